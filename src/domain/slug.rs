/// URL slug generation for listings and posts.
///
/// Folds the Portuguese diacritics we actually see in titles to ASCII,
/// lowercases, and collapses everything else to single hyphens.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for c in text.chars() {
        match fold_char(c) {
            Some(folded) => {
                out.push(folded);
                last_was_hyphen = false;
            }
            None => {
                if !last_was_hyphen {
                    out.push('-');
                    last_was_hyphen = true;
                }
            }
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn fold_char(c: char) -> Option<char> {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'a'..='z' | '0'..='9' => Some(lower),
        'á' | 'à' | 'â' | 'ã' | 'ä' => Some('a'),
        'é' | 'è' | 'ê' | 'ë' => Some('e'),
        'í' | 'ì' | 'î' | 'ï' => Some('i'),
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => Some('o'),
        'ú' | 'ù' | 'û' | 'ü' => Some('u'),
        'ç' => Some('c'),
        'ñ' => Some('n'),
        _ => None,
    }
}

/// Find a slug not yet taken: probe `base`, then `base-2`, `base-3`, ...
/// `exists` reports whether a candidate is already in use.
pub fn unique_slug<F, E>(base: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    if !exists(base)? {
        return Ok(base.to_string());
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base}-{counter}");
        if !exists(&candidate)? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_folds_portuguese_diacritics() {
        assert_eq!(
            slugify("Lançamento Jardins - 3 Suítes"),
            "lancamento-jardins-3-suites"
        );
        assert_eq!(slugify("Cobertura São João"), "cobertura-sao-joao");
    }

    #[test]
    fn slugify_collapses_punctuation_and_spaces() {
        assert_eq!(
            slugify("  Studio!!  Pinheiros -- Investimento  "),
            "studio-pinheiros-investimento"
        );
    }

    #[test]
    fn slugify_drops_unmappable_chars() {
        assert_eq!(slugify("Apê 2Q 🏠 Vila Mariana"), "ape-2q-vila-mariana");
    }

    #[test]
    fn slugify_empty_input() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn unique_slug_appends_counter() {
        let taken = ["apartamento", "apartamento-2"];
        let slug = unique_slug::<_, ()>("apartamento", |s| Ok(taken.contains(&s))).unwrap();
        assert_eq!(slug, "apartamento-3");
    }

    #[test]
    fn unique_slug_keeps_free_base() {
        let slug = unique_slug::<_, ()>("casa-nova", |_| Ok(false)).unwrap();
        assert_eq!(slug, "casa-nova");
    }
}
