use crate::domain::lead::Lead;
use crate::templates::layouts::admin_layout;
use maud::{html, Markup};

pub fn admin_leads_page(leads: &[Lead]) -> Markup {
    admin_layout(
        "Leads",
        "leads",
        html! {
            p { a class="button" href="/admin/leads/export.xlsx" { "Exportar .xlsx" } }
            @if leads.is_empty() {
                p class="empty" { "Nenhum lead recebido ainda." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Data" }
                            th { "Nome" }
                            th { "Contato" }
                            th { "Mensagem" }
                            th { "Imóvel" }
                            th { "Campanha" }
                        }
                    }
                    tbody {
                        @for lead in leads {
                            tr {
                                td { (lead.created_at.format("%d/%m/%Y %H:%M").to_string()) }
                                td { (lead.name) }
                                td {
                                    @if let Some(email) = &lead.email {
                                        a href={ "mailto:" (email) } { (email) }
                                        br;
                                    }
                                    @if let Some(phone) = &lead.phone {
                                        (phone)
                                    }
                                }
                                td { (lead.message.as_deref().unwrap_or("")) }
                                td { (lead.property_title.as_deref().unwrap_or("-")) }
                                td {
                                    @if let Some(utm) = &lead.utm {
                                        @for (key, value) in utm {
                                            span class="utm" { (key) "=" (value) } " "
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
