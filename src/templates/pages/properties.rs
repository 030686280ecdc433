use crate::config::SiteConfig;
use crate::db::properties::PropertyFilter;
use crate::domain::property::{format_area, format_price, Property, PropertySummary};
use crate::seo;
use crate::templates::components::{filter_bar, lead_form, property_card};
use crate::templates::layouts::{site_layout, PageMeta};
use maud::{html, Markup};

pub fn property_list_page(
    cfg: &SiteConfig,
    filter: &PropertyFilter,
    properties: &[PropertySummary],
) -> Markup {
    let meta = PageMeta::new(
        seo::page_title(cfg, "Imóveis"),
        "Apartamentos, lançamentos e imóveis prontos. Filtre por bairro, preço e quartos.",
        seo::canonical(cfg, "/imoveis", None),
    )
    .with_json_ld(seo::breadcrumbs(cfg, &[("Início", "/"), ("Imóveis", "/imoveis")]));

    site_layout(
        cfg,
        &meta,
        html! {
            section class="catalog" {
                h1 { "Imóveis" }
                (filter_bar(filter))
                @if properties.is_empty() {
                    p class="empty" { "Nenhum imóvel encontrado com esses filtros." }
                } @else {
                    p class="result-count" { (properties.len()) " imóveis encontrados" }
                    div class="card-grid" {
                        @for prop in properties {
                            (property_card(prop))
                        }
                    }
                }
            }
        },
    )
}

pub fn property_detail_page(
    cfg: &SiteConfig,
    prop: &Property,
    nearby: &[(PropertySummary, f64)],
) -> Markup {
    let path = format!("/imoveis/{}", prop.slug);
    let description = seo::property_meta_description(prop);
    let mut meta = PageMeta::new(
        seo::page_title(cfg, &prop.title),
        description,
        seo::canonical(cfg, &path, prop.canonical_url.as_deref()),
    )
    .with_json_ld(seo::property(cfg, prop))
    .with_json_ld(seo::breadcrumbs(
        cfg,
        &[("Início", "/"), ("Imóveis", "/imoveis"), (&prop.title, &path)],
    ));
    if let Some(og) = prop.og_image.as_deref().or(prop.images.first().map(|i| i.url.as_str())) {
        meta = meta.with_og_image(og);
    }

    site_layout(
        cfg,
        &meta,
        html! {
            article class="property-detail" {
                header {
                    span class="badge" { (prop.status.label()) }
                    span class="badge badge-purpose" { (prop.purpose.label()) }
                    h1 { (prop.title) }
                    p class="location" {
                        (prop.address.display_line())
                        " · "
                        a href={ "/bairros/" (prop.address.neighborhood_slug) } {
                            "Guia de " (prop.address.neighborhood)
                        }
                    }
                    p class="price" { (format_price(prop.price)) }
                }

                @if !prop.images.is_empty() {
                    section class="gallery" {
                        @for img in &prop.images {
                            img src=(img.url) alt=(img.alt.as_deref().unwrap_or(&prop.title))
                                width=[img.width] height=[img.height] loading="lazy";
                        }
                    }
                }

                section class="specs" {
                    h2 { "Características" }
                    dl {
                        @if let Some(bedrooms) = prop.bedrooms {
                            dt { "Quartos" } dd { (bedrooms) }
                        }
                        @if let Some(suites) = prop.suites {
                            dt { "Suítes" } dd { (suites) }
                        }
                        @if let Some(bathrooms) = prop.bathrooms {
                            dt { "Banheiros" } dd { (bathrooms) }
                        }
                        @if let Some(spots) = prop.parking_spots {
                            dt { "Vagas" } dd { (spots) }
                        }
                        @if prop.area_private.is_some() {
                            dt { "Área privativa" } dd { (format_area(prop.area_private)) }
                        }
                        @if prop.area_total.is_some() {
                            dt { "Área total" } dd { (format_area(prop.area_total)) }
                        }
                        @if let Some(floor) = prop.floor {
                            dt { "Andar" } dd { (floor) "º" }
                        }
                        @if let Some(year) = prop.year_built {
                            dt { "Ano de construção" } dd { (year) }
                        }
                        @if let Some(date) = prop.delivery_date {
                            dt { "Previsão de entrega" } dd { (date.format("%m/%Y").to_string()) }
                        }
                        @if let Some(fee) = prop.condo_fee {
                            dt { "Condomínio" } dd { (format_price(Some(fee))) "/mês" }
                        }
                        @if let Some(iptu) = prop.iptu_yearly {
                            dt { "IPTU" } dd { (format_price(Some(iptu))) "/ano" }
                        }
                        @if prop.allow_airbnb {
                            dt { "Locação de temporada" } dd { "Permitida (Airbnb)" }
                        }
                    }
                }

                @if !prop.highlights.is_empty() {
                    section class="highlights" {
                        h2 { "Destaques" }
                        ul {
                            @for item in &prop.highlights {
                                li { (item) }
                            }
                        }
                    }
                }

                section class="description" {
                    h2 { "Sobre o imóvel" }
                    @for paragraph in prop.description.split("\n\n") {
                        p { (paragraph) }
                    }
                }

                @if !prop.amenities.is_empty() {
                    section class="amenities" {
                        h2 { "Comodidades" }
                        ul {
                            @for amenity in &prop.amenities {
                                li { (amenity) }
                            }
                        }
                    }
                }

                @if let Some(developer) = &prop.developer {
                    p class="developer" { "Construtora: " (developer) }
                }

                section class="contact" {
                    (lead_form(Some(prop.id), "Tenho interesse neste imóvel"))
                    a class="whatsapp"
                        href={ "https://wa.me/" (cfg.whatsapp_number)
                               "?text=Tenho%20interesse%20no%20im%C3%B3vel%20"
                               (prop.slug) }
                        rel="noopener" target="_blank" { "Chamar no WhatsApp" }
                }

                @if !nearby.is_empty() {
                    section class="nearby" {
                        h2 { "Imóveis próximos" }
                        div class="card-grid" {
                            @for (summary, distance_m) in nearby {
                                div class="nearby-item" {
                                    (property_card(summary))
                                    p class="distance" { (format_distance(*distance_m)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m de distância", meters.round() as i64)
    } else {
        format!("{:.1} km de distância", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(420.3), "420 m de distância");
        assert_eq!(format_distance(1500.0), "1.5 km de distância");
    }
}
