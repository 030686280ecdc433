use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use url::Url;

/// A stored contact-form submission.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub source: String,
    pub utm: Option<BTreeMap<String, String>>,
    pub property_id: Option<i64>,
    pub property_title: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A validated submission ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub property_id: Option<i64>,
    pub utm: Option<BTreeMap<String, String>>,
}

impl NewLead {
    /// Validation mirrors the public form: the name is required, and the
    /// lead must carry at least one way to reach the person back.
    pub fn validate(
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        message: Option<&str>,
        property_id: Option<i64>,
    ) -> Result<Self, String> {
        let name = name.trim();
        if name.chars().count() < 2 {
            return Err("Nome deve ter pelo menos 2 caracteres".to_string());
        }

        let email = match email.map(str::trim).filter(|s| !s.is_empty()) {
            Some(e) => {
                if !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
                    return Err("E-mail inválido".to_string());
                }
                Some(e.to_lowercase())
            }
            None => None,
        };

        let phone = match phone.map(str::trim).filter(|s| !s.is_empty()) {
            Some(p) => {
                let digits = p.chars().filter(|c| c.is_ascii_digit()).count();
                if digits < 10 {
                    return Err("Telefone inválido".to_string());
                }
                Some(p.to_string())
            }
            None => None,
        };

        if email.is_none() && phone.is_none() {
            return Err("Informe e-mail ou telefone para contato".to_string());
        }

        let message = message
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(NewLead {
            name: name.to_string(),
            email,
            phone,
            message,
            property_id,
            utm: None,
        })
    }
}

const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Pull the standard utm_* parameters from a referer URL, if any.
pub fn utm_from_referer(referer: &str) -> Option<BTreeMap<String, String>> {
    let url = Url::parse(referer).ok()?;
    let mut utm = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        if UTM_KEYS.contains(&key.as_ref()) && !value.is_empty() {
            utm.insert(key.into_owned(), value.into_owned());
        }
    }
    if utm.is_empty() {
        None
    } else {
        Some(utm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_requires_name() {
        let res = NewLead::validate("M", Some("m@x.com"), None, None, None);
        assert!(res.is_err());
    }

    #[test]
    fn lead_requires_contact_channel() {
        let res = NewLead::validate("Maria Silva", None, None, Some("Olá"), None);
        assert_eq!(
            res.unwrap_err(),
            "Informe e-mail ou telefone para contato"
        );
    }

    #[test]
    fn lead_rejects_bad_email_and_phone() {
        assert!(NewLead::validate("Maria", Some("sem-arroba"), None, None, None).is_err());
        assert!(NewLead::validate("Maria", None, Some("1234"), None, None).is_err());
    }

    #[test]
    fn lead_normalizes_email() {
        let lead =
            NewLead::validate("Maria Silva", Some("  Maria@Email.COM "), None, None, Some(7))
                .unwrap();
        assert_eq!(lead.email.as_deref(), Some("maria@email.com"));
        assert_eq!(lead.property_id, Some(7));
    }

    #[test]
    fn lead_accepts_formatted_phone() {
        let lead = NewLead::validate("João", None, Some("(11) 98765-4321"), None, None).unwrap();
        assert_eq!(lead.phone.as_deref(), Some("(11) 98765-4321"));
    }

    #[test]
    fn utm_extraction_picks_known_keys() {
        let utm = utm_from_referer(
            "https://site.com/imoveis?utm_source=google&utm_campaign=verao&foo=bar",
        )
        .unwrap();
        assert_eq!(utm.get("utm_source").map(String::as_str), Some("google"));
        assert_eq!(utm.get("utm_campaign").map(String::as_str), Some("verao"));
        assert!(!utm.contains_key("foo"));
    }

    #[test]
    fn utm_extraction_none_without_params() {
        assert_eq!(utm_from_referer("https://site.com/contato"), None);
        assert_eq!(utm_from_referer("not a url"), None);
    }
}
