use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Editorial categories of the content-marketing blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogCategory {
    Investimentos,
    MercadoImobiliario,
    Financiamentos,
    DicasCompradores,
    ValorizacaoBairros,
    Tendencias,
    GuiaComprador,
}

impl BlogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::Investimentos => "INVESTIMENTOS",
            BlogCategory::MercadoImobiliario => "MERCADO_IMOBILIARIO",
            BlogCategory::Financiamentos => "FINANCIAMENTOS",
            BlogCategory::DicasCompradores => "DICAS_COMPRADORES",
            BlogCategory::ValorizacaoBairros => "VALORIZACAO_BAIRROS",
            BlogCategory::Tendencias => "TENDENCIAS",
            BlogCategory::GuiaComprador => "GUIA_COMPRADOR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INVESTIMENTOS" => Some(BlogCategory::Investimentos),
            "MERCADO_IMOBILIARIO" => Some(BlogCategory::MercadoImobiliario),
            "FINANCIAMENTOS" => Some(BlogCategory::Financiamentos),
            "DICAS_COMPRADORES" => Some(BlogCategory::DicasCompradores),
            "VALORIZACAO_BAIRROS" => Some(BlogCategory::ValorizacaoBairros),
            "TENDENCIAS" => Some(BlogCategory::Tendencias),
            "GUIA_COMPRADOR" => Some(BlogCategory::GuiaComprador),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlogCategory::Investimentos => "Investimentos",
            BlogCategory::MercadoImobiliario => "Mercado Imobiliário",
            BlogCategory::Financiamentos => "Financiamentos",
            BlogCategory::DicasCompradores => "Dicas para Compradores",
            BlogCategory::ValorizacaoBairros => "Valorização de Bairros",
            BlogCategory::Tendencias => "Tendências",
            BlogCategory::GuiaComprador => "Guia do Comprador",
        }
    }

    pub fn all() -> [BlogCategory; 7] {
        [
            BlogCategory::Investimentos,
            BlogCategory::MercadoImobiliario,
            BlogCategory::Financiamentos,
            BlogCategory::DicasCompradores,
            BlogCategory::ValorizacaoBairros,
            BlogCategory::Tendencias,
            BlogCategory::GuiaComprador,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub cover_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub author: String,
    pub author_bio: Option<String>,
    pub reading_time: Option<i64>,
    pub faq: Vec<FaqEntry>,
    pub featured: bool,
    pub published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub views: i64,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct BlogPostSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: BlogCategory,
    pub cover_image: Option<String>,
    pub author: String,
    pub reading_time: Option<i64>,
    pub published: bool,
    pub published_at: Option<NaiveDateTime>,
}

/// Validated output of the admin blog form.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: BlogCategory,
    pub cover_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub author: String,
    pub author_bio: Option<String>,
    pub reading_time: Option<i64>,
    pub faq: Vec<FaqEntry>,
    pub featured: bool,
    pub published: bool,
    pub published_at: Option<NaiveDateTime>,
}

/// Estimated reading time in minutes at ~200 words per minute, used when
/// the author leaves the field blank. Always at least one minute.
pub fn estimate_reading_time(content: &str) -> i64 {
    let words = content.split_whitespace().count() as i64;
    ((words + 199) / 200).max(1)
}

/// Shorten text to `max_len` characters on a char boundary, appending "...".
pub fn excerpt_of(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}
