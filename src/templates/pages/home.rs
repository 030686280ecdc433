use crate::config::SiteConfig;
use crate::domain::blog::BlogPostSummary;
use crate::domain::property::PropertySummary;
use crate::seo;
use crate::templates::components::{blog_card, lead_form, property_card};
use crate::templates::layouts::{site_layout, PageMeta};
use maud::{html, Markup};

pub fn home_page(
    cfg: &SiteConfig,
    featured: &[PropertySummary],
    recent_posts: &[BlogPostSummary],
) -> Markup {
    let meta = PageMeta::new(
        cfg.site_name.clone(),
        cfg.site_description.clone(),
        seo::canonical(cfg, "/", None),
    )
    .with_json_ld(seo::website(cfg))
    .with_json_ld(seo::real_estate_agent(cfg));

    site_layout(
        cfg,
        &meta,
        html! {
            section class="hero" {
                h1 { "Encontre seu próximo imóvel" }
                p { (cfg.site_description) }
                form class="hero-search" method="get" action="/imoveis" {
                    input type="search" name="busca"
                        placeholder="Busque por rua, bairro ou empreendimento";
                    button type="submit" { "Buscar" }
                }
            }

            @if !featured.is_empty() {
                section class="featured" {
                    h2 { "Destaques" }
                    div class="card-grid" {
                        @for prop in featured {
                            (property_card(prop))
                        }
                    }
                    p { a href="/imoveis" { "Ver todos os imóveis" } }
                }
            }

            @if !recent_posts.is_empty() {
                section class="recent-posts" {
                    h2 { "Do blog" }
                    div class="card-grid" {
                        @for post in recent_posts {
                            (blog_card(post))
                        }
                    }
                    p { a href="/blog" { "Ver todos os artigos" } }
                }
            }

            section class="home-contact" {
                (lead_form(None, "Fale com um especialista"))
            }
        },
    )
}
