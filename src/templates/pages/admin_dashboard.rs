use crate::domain::lead::Lead;
use crate::templates::layouts::admin_layout;
use maud::{html, Markup};

pub struct DashboardCounts {
    pub published_properties: i64,
    pub total_properties: i64,
    pub published_posts: i64,
    pub total_posts: i64,
    pub leads: i64,
}

pub fn dashboard_page(email: &str, counts: &DashboardCounts, latest_leads: &[Lead]) -> Markup {
    admin_layout(
        "Início",
        "dashboard",
        html! {
            p { "Logado como " (email) }
            div class="stat-grid" {
                a class="stat" href="/admin/imoveis" {
                    strong { (counts.published_properties) "/" (counts.total_properties) }
                    span { "imóveis publicados" }
                }
                a class="stat" href="/admin/blog" {
                    strong { (counts.published_posts) "/" (counts.total_posts) }
                    span { "posts publicados" }
                }
                a class="stat" href="/admin/leads" {
                    strong { (counts.leads) }
                    span { "leads recebidos" }
                }
            }
            div class="quick-actions" {
                a href="/admin/imoveis/novo" { "Novo imóvel" }
                a href="/admin/blog/novo" { "Novo post" }
                a href="/admin/leads/export.xlsx" { "Exportar leads (.xlsx)" }
            }
            @if !latest_leads.is_empty() {
                section class="latest-leads" {
                    h2 { "Últimos leads" }
                    table {
                        thead {
                            tr { th { "Data" } th { "Nome" } th { "Contato" } th { "Imóvel" } }
                        }
                        tbody {
                            @for lead in latest_leads {
                                tr {
                                    td { (lead.created_at.format("%d/%m/%Y %H:%M").to_string()) }
                                    td { (lead.name) }
                                    td {
                                        @if let Some(email) = &lead.email { (email) }
                                        @else if let Some(phone) = &lead.phone { (phone) }
                                    }
                                    td { (lead.property_title.as_deref().unwrap_or("-")) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
