use crate::domain::property::{format_area, format_price, PropertySummary};
use maud::{html, Markup};

/// One listing card for the catalog, home page and "nearby" strips.
pub fn property_card(prop: &PropertySummary) -> Markup {
    let href = format!("/imoveis/{}", prop.slug);
    html! {
        article class="property-card" {
            a href=(href) {
                @if let Some(cover) = &prop.cover_image {
                    img src=(cover) alt=(prop.cover_alt.as_deref().unwrap_or(&prop.title))
                        loading="lazy";
                } @else {
                    div class="no-photo" { "Sem foto" }
                }
                div class="card-body" {
                    span class="badge" { (prop.status.label()) }
                    span class="badge badge-purpose" { (prop.purpose.label()) }
                    @if prop.allow_airbnb {
                        span class="badge badge-airbnb" { "Aceita Airbnb" }
                    }
                    h3 { (prop.title) }
                    p class="location" { (prop.neighborhood) ", " (prop.city) }
                    ul class="specs" {
                        @if let Some(bedrooms) = prop.bedrooms {
                            li { (bedrooms) " quartos" }
                        }
                        @if let Some(bathrooms) = prop.bathrooms {
                            li { (bathrooms) " banheiros" }
                        }
                        @if let Some(spots) = prop.parking_spots {
                            li { (spots) " vagas" }
                        }
                        @if prop.area_private.is_some() {
                            li { (format_area(prop.area_private)) }
                        }
                    }
                    p class="price" { (format_price(prop.price)) }
                }
            }
        }
    }
}
