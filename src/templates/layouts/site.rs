use crate::config::SiteConfig;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::Value;

/// Everything the head of a public page needs.
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_image: Option<String>,
    pub json_ld: Vec<Value>,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            canonical: canonical.into(),
            og_image: None,
            json_ld: Vec::new(),
        }
    }

    pub fn with_og_image(mut self, url: impl Into<String>) -> Self {
        self.og_image = Some(url.into());
        self
    }

    pub fn with_json_ld(mut self, value: Value) -> Self {
        self.json_ld.push(value);
        self
    }
}

pub fn site_layout(cfg: &SiteConfig, meta: &PageMeta, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(meta.canonical);
                meta property="og:type" content="website";
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(meta.canonical);
                meta property="og:site_name" content=(cfg.site_name);
                @if let Some(og_image) = &meta.og_image {
                    meta property="og:image" content=(og_image);
                }
                link rel="icon" href="/static/favicon.ico";
                link rel="alternate" type="application/rss+xml"
                    title="Blog" href="/blog/rss.xml";
                link rel="stylesheet" href="/static/main.css";
                @for json_ld in &meta.json_ld {
                    script type="application/ld+json" {
                        // "<" serialized as unicode escape, the payload cannot close the tag
                        (PreEscaped(json_ld.to_string().replace('<', "\\u003c")))
                    }
                }
            }
            body {
                header class="site-header" {
                    a href="/" class="logo" { (cfg.site_name) }
                    nav {
                        ul {
                            li { a href="/imoveis" { "Imóveis" } }
                            li { a href="/bairros" { "Bairros" } }
                            li { a href="/blog" { "Blog" } }
                            li { a href="/sobre" { "Sobre" } }
                            li { a href="/contato" { "Contato" } }
                        }
                    }
                }
                main { (content) }
                footer class="site-footer" {
                    div class="footer-contact" {
                        p { (cfg.site_name) }
                        p { a href={ "mailto:" (cfg.contact_email) } { (cfg.contact_email) } }
                        p { (cfg.contact_phone) }
                        p {
                            a href={ "https://wa.me/" (cfg.whatsapp_number) }
                                rel="noopener" target="_blank" { "WhatsApp" }
                        }
                    }
                    div class="footer-links" {
                        a href="/politica-de-privacidade" { "Política de Privacidade" }
                        a href="/blog/rss.xml" { "RSS" }
                    }
                }
            }
        }
    }
}
