use crate::db::amenities::Amenity;
use crate::db::properties::AdminPropertyRow;
use crate::domain::property::{format_price, Property, PropertyPurpose, PropertyStatus};
use crate::templates::layouts::admin_layout;
use maud::{html, Markup};

pub fn admin_property_list_page(rows: &[AdminPropertyRow]) -> Markup {
    admin_layout(
        "Imóveis",
        "properties",
        html! {
            p { a class="button" href="/admin/imoveis/novo" { "Novo imóvel" } }
            @if rows.is_empty() {
                p class="empty" { "Nenhum imóvel cadastrado." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Título" }
                            th { "Status" }
                            th { "Finalidade" }
                            th { "Preço" }
                            th { "Publicado" }
                            th { "Destaque" }
                            th { "Visitas" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { a href={ "/admin/imoveis/" (row.id) "/editar" } { (row.title) } }
                                td { (row.status.label()) }
                                td { (row.purpose.label()) }
                                td { (format_price(row.price)) }
                                td { @if row.published { "Sim" } @else { "Não" } }
                                td { @if row.featured { "Sim" } @else { "" } }
                                td { (row.views) }
                                td {
                                    a href={ "/imoveis/" (row.slug) } target="_blank" { "Ver" }
                                    " "
                                    form method="post"
                                        action={ "/admin/imoveis/" (row.id) "/excluir" }
                                        class="inline" {
                                        button type="submit" class="danger" { "Excluir" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Create/edit form. `existing` carries the current values plus the
/// checked amenity ids when editing.
pub fn admin_property_form_page(
    existing: Option<(&Property, &[i64])>,
    neighborhoods: &[(i64, String)],
    amenities: &[Amenity],
) -> Markup {
    let (title, action) = match existing {
        Some((prop, _)) => ("Editar imóvel", format!("/admin/imoveis/{}", prop.id)),
        None => ("Novo imóvel", "/admin/imoveis".to_string()),
    };
    let prop = existing.map(|(p, _)| p);
    let checked_amenities: &[i64] = existing.map(|(_, ids)| ids).unwrap_or(&[]);

    let images_json = prop
        .map(|p| serde_json::to_string(&p.images).unwrap_or_else(|_| "[]".into()))
        .unwrap_or_else(|| "[]".to_string());

    admin_layout(
        title,
        "properties",
        html! {
            form method="post" action=(action) class="admin-form" {
                fieldset {
                    legend { "Anúncio" }
                    label { "Título"
                        input type="text" name="title" required minlength="5"
                            value=[prop.map(|p| p.title.as_str())];
                    }
                    label { "Descrição"
                        textarea name="description" rows="8" required {
                            @if let Some(p) = prop { (p.description) }
                        }
                    }
                    label { "Status"
                        select name="status" required {
                            @for status in PropertyStatus::all() {
                                option value=(status.as_str())
                                    selected[prop.map(|p| p.status) == Some(status)] {
                                    (status.label())
                                }
                            }
                        }
                    }
                    label { "Finalidade"
                        select name="purpose" required {
                            @for purpose in PropertyPurpose::all() {
                                option value=(purpose.as_str())
                                    selected[prop.map(|p| p.purpose) == Some(purpose)] {
                                    (purpose.label())
                                }
                            }
                        }
                    }
                    label { "Destaques (um por linha)"
                        textarea name="highlights" rows="4" {
                            @if let Some(p) = prop { (p.highlights.join("\n")) }
                        }
                    }
                }

                fieldset {
                    legend { "Valores" }
                    label { "Preço (R$)"
                        input type="number" name="price" min="0" value=[prop.and_then(|p| p.price)];
                    }
                    label { "Condomínio (R$/mês)"
                        input type="number" name="condo_fee" min="0"
                            value=[prop.and_then(|p| p.condo_fee)];
                    }
                    label { "IPTU (R$/ano)"
                        input type="number" name="iptu_yearly" min="0"
                            value=[prop.and_then(|p| p.iptu_yearly)];
                    }
                }

                fieldset {
                    legend { "Características" }
                    label { "Área total (m²)"
                        input type="text" name="area_total" value=[prop.and_then(|p| p.area_total)];
                    }
                    label { "Área privativa (m²)"
                        input type="text" name="area_private"
                            value=[prop.and_then(|p| p.area_private)];
                    }
                    label { "Quartos"
                        input type="number" name="bedrooms" min="0"
                            value=[prop.and_then(|p| p.bedrooms)];
                    }
                    label { "Suítes"
                        input type="number" name="suites" min="0"
                            value=[prop.and_then(|p| p.suites)];
                    }
                    label { "Banheiros"
                        input type="number" name="bathrooms" min="0"
                            value=[prop.and_then(|p| p.bathrooms)];
                    }
                    label { "Vagas"
                        input type="number" name="parking_spots" min="0"
                            value=[prop.and_then(|p| p.parking_spots)];
                    }
                    label { "Andar"
                        input type="number" name="floor" value=[prop.and_then(|p| p.floor)];
                    }
                    label { "Ano de construção"
                        input type="number" name="year_built"
                            value=[prop.and_then(|p| p.year_built)];
                    }
                    label { "Previsão de entrega"
                        input type="date" name="delivery_date"
                            value=[prop.and_then(|p| p.delivery_date)
                                .map(|d| d.format("%Y-%m-%d").to_string())];
                    }
                    label class="checkbox" {
                        input type="checkbox" name="allow_airbnb"
                            checked[prop.map(|p| p.allow_airbnb).unwrap_or(false)];
                        "Aceita Airbnb"
                    }
                }

                fieldset {
                    legend { "Endereço" }
                    label { "Bairro"
                        select name="neighborhood_id" required {
                            option value="" { "Selecione" }
                            @for (id, label) in neighborhoods {
                                option value=(id)
                                    selected[prop.map(|p| p.address.neighborhood_id) == Some(*id)] {
                                    (label)
                                }
                            }
                        }
                    }
                    label { "Rua"
                        input type="text" name="street" required
                            value=[prop.map(|p| p.address.street.as_str())];
                    }
                    label { "Número"
                        input type="text" name="street_number"
                            value=[prop.and_then(|p| p.address.street_number.as_deref())];
                    }
                    label { "Complemento"
                        input type="text" name="complement"
                            value=[prop.and_then(|p| p.address.complement.as_deref())];
                    }
                    label { "CEP"
                        input type="text" name="postal_code" required
                            value=[prop.map(|p| p.address.postal_code.as_str())];
                    }
                    label { "Latitude"
                        input type="text" name="lat" value=[prop.and_then(|p| p.address.lat)];
                    }
                    label { "Longitude"
                        input type="text" name="lng" value=[prop.and_then(|p| p.address.lng)];
                    }
                }

                fieldset {
                    legend { "Comodidades" }
                    @for amenity in amenities {
                        label class="checkbox" {
                            input type="checkbox" name="amenities" value=(amenity.id)
                                checked[checked_amenities.contains(&amenity.id)];
                            (amenity.name)
                        }
                    }
                }

                fieldset {
                    legend { "Fotos" }
                    // the upload widget posts to /api/upload and rewrites this field
                    input type="hidden" name="images" id="images-field" value=(images_json);
                    input type="file" id="image-picker" accept="image/jpeg,image/png,image/webp"
                        multiple data-endpoint="/api/upload?tipo=properties";
                    div id="image-previews" {
                        @if let Some(p) = prop {
                            @for img in &p.images {
                                img src=(img.url) alt=(img.alt.as_deref().unwrap_or(""))
                                    width="120";
                            }
                        }
                    }
                    script src="/static/upload.js" defer {}
                }

                fieldset {
                    legend { "Publicação" }
                    label { "Construtora"
                        input type="text" name="developer"
                            value=[prop.and_then(|p| p.developer.as_deref())];
                    }
                    label { "Corretor responsável"
                        input type="text" name="realtor_name"
                            value=[prop.and_then(|p| p.realtor_name.as_deref())];
                    }
                    label { "URL canônica (opcional)"
                        input type="url" name="canonical_url"
                            value=[prop.and_then(|p| p.canonical_url.as_deref())];
                    }
                    label { "Imagem OG (opcional)"
                        input type="text" name="og_image"
                            value=[prop.and_then(|p| p.og_image.as_deref())];
                    }
                    label class="checkbox" {
                        input type="checkbox" name="featured"
                            checked[prop.map(|p| p.featured).unwrap_or(false)];
                        "Destaque na home"
                    }
                    label class="checkbox" {
                        input type="checkbox" name="published"
                            checked[prop.map(|p| p.published).unwrap_or(false)];
                        "Publicado"
                    }
                }

                button type="submit" { "Salvar" }
            }
        },
    )
}
