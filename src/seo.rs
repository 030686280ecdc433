//! JSON-LD structured data for search engines.

use crate::config::SiteConfig;
use crate::domain::blog::{BlogPost, FaqEntry};
use crate::domain::property::{format_price, Property, PropertyPurpose};
use serde_json::{json, Value};

/// WebSite + SearchAction, emitted on the home page.
pub fn website(cfg: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": cfg.site_name,
        "url": cfg.base_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}/imoveis?busca={{search_term_string}}", cfg.base_url),
            "query-input": "required name=search_term_string"
        }
    })
}

/// RealEstateAgent card, emitted site-wide in the layout.
pub fn real_estate_agent(cfg: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "RealEstateAgent",
        "name": cfg.site_name,
        "url": cfg.base_url,
        "email": cfg.contact_email,
        "telephone": cfg.contact_phone,
        "areaServed": { "@type": "City", "name": "São Paulo" }
    })
}

/// BreadcrumbList from (name, path) pairs; paths are site-relative.
pub fn breadcrumbs(cfg: &SiteConfig, trail: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": format!("{}{}", cfg.base_url, path)
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items
    })
}

/// Residence + Offer for a listing detail page.
pub fn property(cfg: &SiteConfig, prop: &Property) -> Value {
    let url = format!("{}/imoveis/{}", cfg.base_url, prop.slug);
    let images: Vec<String> = prop
        .images
        .iter()
        .map(|img| absolute_url(cfg, &img.url))
        .collect();

    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "Residence",
        "name": prop.title,
        "description": prop.description,
        "url": url,
        "image": images,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": prop.address.display_line(),
            "addressLocality": prop.address.city,
            "addressRegion": prop.address.state_code,
            "postalCode": prop.address.postal_code,
            "addressCountry": "BR"
        }
    });

    if let (Some(lat), Some(lng)) = (prop.address.lat, prop.address.lng) {
        value["geo"] = json!({
            "@type": "GeoCoordinates",
            "latitude": lat,
            "longitude": lng
        });
    }
    if let Some(area) = prop.area_private {
        value["floorSize"] = json!({
            "@type": "QuantitativeValue",
            "value": area,
            "unitCode": "MTK"
        });
    }
    if let Some(bedrooms) = prop.bedrooms {
        value["numberOfRooms"] = json!(bedrooms);
    }
    if let Some(price) = prop.price {
        value["offers"] = json!({
            "@type": "Offer",
            "price": price,
            "priceCurrency": "BRL",
            "availability": "https://schema.org/InStock",
            "businessFunction": match prop.purpose {
                PropertyPurpose::Venda => "http://purl.org/goodrelations/v1#Sell",
                PropertyPurpose::Aluguel => "http://purl.org/goodrelations/v1#LeaseOut",
            }
        });
    }
    value
}

/// BlogPosting for an article page.
pub fn blog_post(cfg: &SiteConfig, post: &BlogPost) -> Value {
    let url = format!("{}/blog/{}", cfg.base_url, post.slug);
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.excerpt,
        "url": url,
        "author": { "@type": "Person", "name": post.author },
        "publisher": { "@type": "Organization", "name": cfg.site_name },
        "mainEntityOfPage": url
    });

    if let Some(published_at) = post.published_at {
        value["datePublished"] = json!(published_at.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    value["dateModified"] = json!(post.updated_at.format("%Y-%m-%dT%H:%M:%S").to_string());
    if let Some(cover) = &post.cover_image {
        value["image"] = json!(absolute_url(cfg, cover));
    }
    if !post.keywords.is_empty() {
        value["keywords"] = json!(post.keywords.join(", "));
    }
    value
}

/// FAQPage block; None when the post has no FAQ entries.
pub fn faq(entries: &[FaqEntry]) -> Option<Value> {
    if entries.is_empty() {
        return None;
    }
    let items: Vec<Value> = entries
        .iter()
        .map(|entry| {
            json!({
                "@type": "Question",
                "name": entry.question,
                "acceptedAnswer": { "@type": "Answer", "text": entry.answer }
            })
        })
        .collect();

    Some(json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": items
    }))
}

fn absolute_url(cfg: &SiteConfig, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        path_or_url.to_string()
    } else {
        format!("{}{}", cfg.base_url, path_or_url)
    }
}

/// Canonical URL for a page: the explicit override when the editor set
/// one, otherwise base_url + path.
pub fn canonical(cfg: &SiteConfig, path: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(url) => url.to_string(),
        None => format!("{}{}", cfg.base_url, path),
    }
}

/// Page title in the "Thing | Site" pattern used across the site.
pub fn page_title(cfg: &SiteConfig, title: &str) -> String {
    format!("{title} | {}", cfg.site_name)
}

/// Short description for property meta tags.
pub fn property_meta_description(prop: &Property) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(b) = prop.bedrooms {
        parts.push(format!("{b} quartos"));
    }
    if let Some(area) = prop.area_private {
        parts.push(format!("{area:.0} m²"));
    }
    parts.push(prop.address.display_line());
    parts.push(format_price(prop.price));
    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::FullAddress;
    use crate::domain::property::PropertyStatus;
    use chrono::NaiveDate;

    fn cfg() -> SiteConfig {
        let mut cfg = SiteConfig::from_env();
        cfg.base_url = "https://imovia.com.br".to_string();
        cfg.site_name = "Imovia Imóveis".to_string();
        cfg
    }

    fn sample_property() -> Property {
        let now = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Property {
            id: 1,
            slug: "residencial-aurora".into(),
            title: "Residencial Aurora".into(),
            description: "Apartamento de 3 quartos".into(),
            status: PropertyStatus::Pronto,
            purpose: PropertyPurpose::Venda,
            price: Some(850_000),
            condo_fee: None,
            iptu_yearly: None,
            area_total: None,
            area_private: Some(92.0),
            bedrooms: Some(3),
            suites: Some(1),
            bathrooms: Some(2),
            parking_spots: Some(2),
            floor: None,
            year_built: None,
            delivery_date: None,
            allow_airbnb: false,
            highlights: vec![],
            developer: None,
            realtor_name: None,
            canonical_url: None,
            og_image: None,
            featured: false,
            published: true,
            views: 0,
            address: FullAddress {
                street: "Rua Augusta".into(),
                street_number: Some("1500".into()),
                complement: None,
                postal_code: "01304-001".into(),
                lat: Some(-23.5615),
                lng: Some(-46.6693),
                neighborhood_id: 1,
                neighborhood: "Jardins".into(),
                neighborhood_slug: "jardins".into(),
                region: None,
                city: "São Paulo".into(),
                state_code: "SP".into(),
            },
            images: vec![],
            amenities: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn website_includes_search_action() {
        let v = website(&cfg());
        assert_eq!(v["@type"], "WebSite");
        assert!(v["potentialAction"]["target"]
            .as_str()
            .unwrap()
            .contains("/imoveis?busca="));
    }

    #[test]
    fn property_offer_and_geo() {
        let v = property(&cfg(), &sample_property());
        assert_eq!(v["@type"], "Residence");
        assert_eq!(v["offers"]["price"], 850_000);
        assert_eq!(v["offers"]["priceCurrency"], "BRL");
        assert_eq!(v["geo"]["latitude"], -23.5615);
        assert_eq!(v["address"]["addressRegion"], "SP");
    }

    #[test]
    fn property_without_price_has_no_offer() {
        let mut p = sample_property();
        p.price = None;
        let v = property(&cfg(), &p);
        assert!(v.get("offers").is_none());
    }

    #[test]
    fn breadcrumbs_are_positioned() {
        let v = breadcrumbs(&cfg(), &[("Início", "/"), ("Imóveis", "/imoveis")]);
        let items = v["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["position"], 2);
        assert_eq!(items[1]["item"], "https://imovia.com.br/imoveis");
    }

    #[test]
    fn faq_empty_is_none() {
        assert!(faq(&[]).is_none());
        let entries = vec![FaqEntry {
            question: "Qual o prazo?".into(),
            answer: "12 meses.".into(),
        }];
        let v = faq(&entries).unwrap();
        assert_eq!(v["mainEntity"][0]["name"], "Qual o prazo?");
    }

    #[test]
    fn canonical_prefers_explicit() {
        let c = cfg();
        assert_eq!(canonical(&c, "/imoveis", None), "https://imovia.com.br/imoveis");
        assert_eq!(
            canonical(&c, "/imoveis", Some("https://outro.com/x")),
            "https://outro.com/x"
        );
    }
}
