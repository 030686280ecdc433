use maud::{html, Markup};

/// Contact form posting to /api/leads. When rendered on a listing page
/// the property id rides along in a hidden field.
pub fn lead_form(property_id: Option<i64>, heading: &str) -> Markup {
    html! {
        form class="lead-form" method="post" action="/api/leads" {
            h3 { (heading) }
            @if let Some(id) = property_id {
                input type="hidden" name="property_id" value=(id);
            }
            label {
                "Nome"
                input type="text" name="name" required minlength="2";
            }
            label {
                "E-mail"
                input type="email" name="email";
            }
            label {
                "Telefone / WhatsApp"
                input type="tel" name="phone";
            }
            label {
                "Mensagem"
                textarea name="message" rows="4" {}
            }
            p class="hint" { "Informe e-mail ou telefone para retornarmos o contato." }
            button type="submit" { "Enviar" }
        }
    }
}
