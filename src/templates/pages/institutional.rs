//! Fixed pages: contato, sobre, política de privacidade, login.

use crate::config::SiteConfig;
use crate::seo;
use crate::templates::components::lead_form;
use crate::templates::layouts::{site_layout, PageMeta};
use maud::{html, Markup, DOCTYPE};

pub fn contact_page(cfg: &SiteConfig, sent: bool) -> Markup {
    let meta = PageMeta::new(
        seo::page_title(cfg, "Contato"),
        "Fale com nossa equipe por telefone, WhatsApp, e-mail ou pelo formulário.",
        seo::canonical(cfg, "/contato", None),
    );

    site_layout(
        cfg,
        &meta,
        html! {
            section class="contact-page" {
                h1 { "Contato" }
                @if sent {
                    p class="flash" { "Mensagem enviada! Retornaremos em breve." }
                }
                div class="contact-channels" {
                    p { "Telefone: " (cfg.contact_phone) }
                    p { "E-mail: " a href={ "mailto:" (cfg.contact_email) } { (cfg.contact_email) } }
                    p {
                        a href={ "https://wa.me/" (cfg.whatsapp_number) }
                            rel="noopener" target="_blank" { "Chamar no WhatsApp" }
                    }
                }
                (lead_form(None, "Envie sua mensagem"))
            }
        },
    )
}

pub fn about_page(cfg: &SiteConfig) -> Markup {
    let meta = PageMeta::new(
        seo::page_title(cfg, "Sobre"),
        "Quem somos e como trabalhamos na compra e venda de imóveis.",
        seo::canonical(cfg, "/sobre", None),
    )
    .with_json_ld(seo::real_estate_agent(cfg));

    site_layout(
        cfg,
        &meta,
        html! {
            section class="about-page" {
                h1 { "Sobre " (cfg.site_name) }
                p {
                    "Atuamos na intermediação de compra, venda e lançamentos de imóveis, "
                    "com atendimento consultivo do primeiro contato à entrega das chaves."
                }
                p {
                    "Nossos guias de bairros e conteúdo editorial ajudam você a decidir "
                    "onde e como morar ou investir."
                }
                p { a href="/contato" { "Fale com a gente" } }
            }
        },
    )
}

pub fn privacy_page(cfg: &SiteConfig) -> Markup {
    let meta = PageMeta::new(
        seo::page_title(cfg, "Política de Privacidade"),
        "Como coletamos, usamos e protegemos seus dados pessoais.",
        seo::canonical(cfg, "/politica-de-privacidade", None),
    );

    site_layout(
        cfg,
        &meta,
        html! {
            section class="privacy-page" {
                h1 { "Política de Privacidade" }
                p {
                    "Os dados enviados pelos formulários deste site (nome, e-mail, telefone "
                    "e mensagem) são usados exclusivamente para retornar o seu contato "
                    "sobre imóveis e serviços relacionados."
                }
                p {
                    "Não vendemos nem compartilhamos seus dados com terceiros fora da "
                    "operação imobiliária. Você pode solicitar a exclusão dos seus dados "
                    "a qualquer momento pelo e-mail " (cfg.contact_email) "."
                }
                p {
                    "Registramos parâmetros de campanha (UTM) da página de origem para "
                    "medir a eficácia dos nossos anúncios."
                }
            }
        },
    )
}

/// Login page for the back office; standalone chrome, no public layout.
pub fn login_page(error: Option<&str>, link_sent: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { "Entrar | Painel" }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="login" {
                main class="login-box" {
                    h1 { "Painel" }
                    @if link_sent {
                        p class="flash" {
                            "Se o e-mail estiver cadastrado, você receberá um link de acesso."
                        }
                    }
                    @if let Some(message) = error {
                        p class="error" { (message) }
                    }
                    form method="post" action="/auth/magic/request" {
                        label {
                            "E-mail"
                            input type="email" name="email" required autofocus;
                        }
                        button type="submit" { "Enviar link de acesso" }
                    }
                }
            }
        }
    }
}
