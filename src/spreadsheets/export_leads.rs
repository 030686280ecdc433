use crate::domain::lead::Lead;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

/// Leads as a spreadsheet for the sales team.
pub fn export_leads_xlsx(leads: &[Lead]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "Data",
        "Nome",
        "E-mail",
        "Telefone",
        "Mensagem",
        "Imóvel",
        "Origem",
        "Campanha (UTM)",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, lead.created_at.format("%d/%m/%Y %H:%M").to_string())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write date: {}", e)))?;

        worksheet
            .write_string(r, 1, &lead.name)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write name: {}", e)))?;

        worksheet
            .write_string(r, 2, lead.email.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write email: {}", e)))?;

        worksheet
            .write_string(r, 3, lead.phone.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write phone: {}", e)))?;

        worksheet
            .write_string(r, 4, lead.message.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write message: {}", e)))?;

        worksheet
            .write_string(r, 5, lead.property_title.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write property: {}", e)))?;

        worksheet
            .write_string(r, 6, &lead.source)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write source: {}", e)))?;

        let utm = lead
            .utm
            .as_ref()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default();
        worksheet
            .write_string(r, 7, utm)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write utm: {}", e)))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    xlsx_response(buffer, "leads.xlsx")
}
