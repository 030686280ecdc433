use maud::{html, Markup, DOCTYPE};

/// Back-office chrome: sidebar nav plus the page body. `active` matches
/// one of "dashboard", "properties", "blog", "leads".
pub fn admin_layout(title: &str, active: &str, content: Markup) -> Markup {
    let item = |key: &str, href: &str, label: &str| {
        html! {
            li .active[key == active] {
                a href=(href) { (label) }
            }
        }
    };

    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (title) " | Painel" }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="admin" {
                aside class="admin-sidebar" {
                    p class="admin-brand" { "Painel" }
                    nav {
                        ul {
                            (item("dashboard", "/admin", "Início"))
                            (item("properties", "/admin/imoveis", "Imóveis"))
                            (item("blog", "/admin/blog", "Blog"))
                            (item("leads", "/admin/leads", "Leads"))
                        }
                    }
                    form method="post" action="/logout" {
                        button type="submit" class="link" { "Sair" }
                    }
                }
                main class="admin-main" {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}
