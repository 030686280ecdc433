use crate::db::properties::{PropertyFilter, PropertySort};
use crate::domain::property::{PropertyPurpose, PropertyStatus};
use maud::{html, Markup};

/// Catalog filter form; GET so results are shareable URLs.
pub fn filter_bar(filter: &PropertyFilter) -> Markup {
    html! {
        form class="filter-bar" method="get" action="/imoveis" {
            input type="search" name="busca" placeholder="Busque por rua, bairro ou título"
                value=[filter.search.as_deref()];

            select name="finalidade" {
                option value="" { "Comprar ou alugar" }
                @for purpose in PropertyPurpose::all() {
                    option value=(purpose.as_str())
                        selected[filter.purpose == Some(purpose)] { (purpose.label()) }
                }
            }
            select name="status" {
                option value="" { "Qualquer fase" }
                @for status in PropertyStatus::all() {
                    option value=(status.as_str())
                        selected[filter.status == Some(status)] { (status.label()) }
                }
            }
            select name="quartos" {
                option value="" { "Quartos" }
                @for n in 1..=4 {
                    option value=(n) selected[filter.min_bedrooms == Some(n)] { (n) "+" }
                }
            }
            input type="number" name="preco-min" placeholder="Preço mín."
                value=[filter.min_price];
            input type="number" name="preco-max" placeholder="Preço máx."
                value=[filter.max_price];
            label class="checkbox" {
                input type="checkbox" name="airbnb" value="1" checked[filter.allow_airbnb];
                "Aceita Airbnb"
            }
            select name="ordem" {
                option value="" selected[filter.sort == PropertySort::Newest] { "Mais recentes" }
                option value="price-asc" selected[filter.sort == PropertySort::PriceAsc] { "Menor preço" }
                option value="price-desc" selected[filter.sort == PropertySort::PriceDesc] { "Maior preço" }
                option value="area-desc" selected[filter.sort == PropertySort::AreaDesc] { "Maior área" }
            }
            button type="submit" { "Filtrar" }
        }
    }
}
