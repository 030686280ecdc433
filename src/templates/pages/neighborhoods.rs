use crate::config::SiteConfig;
use crate::domain::location::{NearbyNeighborhood, Neighborhood, NeighborhoodSummary};
use crate::domain::property::PropertySummary;
use crate::seo;
use crate::templates::components::property_card;
use crate::templates::layouts::{site_layout, PageMeta};
use maud::{html, Markup};

pub fn neighborhood_list_page(
    cfg: &SiteConfig,
    neighborhoods: &[NeighborhoodSummary],
) -> Markup {
    let meta = PageMeta::new(
        seo::page_title(cfg, "Guias de Bairros"),
        "Conheça os bairros: perfil, estilo de vida e os imóveis disponíveis em cada um.",
        seo::canonical(cfg, "/bairros", None),
    )
    .with_json_ld(seo::breadcrumbs(cfg, &[("Início", "/"), ("Bairros", "/bairros")]));

    site_layout(
        cfg,
        &meta,
        html! {
            section class="neighborhood-index" {
                h1 { "Guias de Bairros" }
                @if neighborhoods.is_empty() {
                    p class="empty" { "Nenhum guia publicado ainda." }
                }
                div class="card-grid" {
                    @for nb in neighborhoods {
                        article class="neighborhood-card" {
                            a href={ "/bairros/" (nb.slug) } {
                                @if let Some(cover) = &nb.cover_image {
                                    img src=(cover) alt=(nb.name) loading="lazy";
                                }
                                div class="card-body" {
                                    h3 { (nb.name) }
                                    p class="location" { (nb.city) }
                                    @if let Some(description) = &nb.description {
                                        p { (description) }
                                    }
                                    p class="count" { (nb.property_count) " imóveis disponíveis" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn neighborhood_detail_page(
    cfg: &SiteConfig,
    nb: &Neighborhood,
    city: &str,
    properties: &[PropertySummary],
    nearby: &[NearbyNeighborhood],
) -> Markup {
    let path = format!("/bairros/{}", nb.slug);
    let description = nb
        .description
        .clone()
        .unwrap_or_else(|| format!("Imóveis e guia do bairro {} em {city}.", nb.name));
    let mut meta = PageMeta::new(
        seo::page_title(cfg, &format!("Bairro {}", nb.name)),
        description,
        seo::canonical(cfg, &path, None),
    )
    .with_json_ld(seo::breadcrumbs(
        cfg,
        &[("Início", "/"), ("Bairros", "/bairros"), (&nb.name, &path)],
    ));
    if let Some(cover) = &nb.cover_image {
        meta = meta.with_og_image(cover.clone());
    }

    site_layout(
        cfg,
        &meta,
        html! {
            article class="neighborhood-detail" {
                header {
                    h1 { (nb.name) }
                    p class="location" { (city) }
                    @if let Some(cover) = &nb.cover_image {
                        img src=(cover) alt=(nb.name);
                    }
                }

                @if let Some(description) = &nb.description {
                    section class="about" {
                        @for paragraph in description.split("\n\n") {
                            p { (paragraph) }
                        }
                    }
                }

                section class="listings" {
                    h2 { "Imóveis em " (nb.name) }
                    @if properties.is_empty() {
                        p class="empty" { "Nenhum imóvel disponível neste bairro no momento." }
                    } @else {
                        div class="card-grid" {
                            @for prop in properties {
                                (property_card(prop))
                            }
                        }
                    }
                }

                @if !nearby.is_empty() {
                    section class="nearby" {
                        h2 { "Bairros próximos" }
                        ul class="nearby-neighborhoods" {
                            @for other in nearby {
                                li {
                                    a href={ "/bairros/" (other.slug) } { (other.name) }
                                    " — "
                                    (format_km(other.distance_m))
                                    " · "
                                    (other.property_count) " imóveis"
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn format_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}
