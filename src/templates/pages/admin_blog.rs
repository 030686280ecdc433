use crate::domain::blog::{BlogCategory, BlogPost, BlogPostSummary};
use crate::templates::layouts::admin_layout;
use maud::{html, Markup};

pub fn admin_blog_list_page(posts: &[BlogPostSummary]) -> Markup {
    admin_layout(
        "Blog",
        "blog",
        html! {
            p { a class="button" href="/admin/blog/novo" { "Novo post" } }
            @if posts.is_empty() {
                p class="empty" { "Nenhum post ainda." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Título" }
                            th { "Categoria" }
                            th { "Autor" }
                            th { "Publicado" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        @for post in posts {
                            tr {
                                td { a href={ "/admin/blog/" (post.id) "/editar" } { (post.title) } }
                                td { (post.category.label()) }
                                td { (post.author) }
                                td {
                                    @if let Some(published_at) = post.published_at {
                                        (published_at.format("%d/%m/%Y").to_string())
                                    } @else {
                                        "Rascunho"
                                    }
                                }
                                td {
                                    a href={ "/blog/" (post.slug) } target="_blank" { "Ver" }
                                    " "
                                    form method="post"
                                        action={ "/admin/blog/" (post.id) "/excluir" }
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

pub fn admin_blog_form_page(existing: Option<&BlogPost>) -> Markup {
    let (title, action) = match existing {
        Some(post) => ("Editar post", format!("/admin/blog/{}", post.id)),
        None => ("Novo post", "/admin/blog".to_string()),
    };
    let faq_json = existing
        .map(|p| serde_json::to_string(&p.faq).unwrap_or_else(|_| "[]".into()))
        .unwrap_or_else(|| "[]".to_string());

    admin_layout(
        title,
        "blog",
        html! {
            form method="post" action=(action) class="admin-form" {
                fieldset {
                    legend { "Conteúdo" }
                    label { "Título"
                        input type="text" name="title" required
                            value=[existing.map(|p| p.title.as_str())];
                    }
                    label { "Slug (em branco para gerar do título)"
                        input type="text" name="slug"
                            value=[existing.map(|p| p.slug.as_str())];
                    }
                    label { "Categoria"
                        select name="category" required {
                            @for category in BlogCategory::all() {
                                option value=(category.as_str())
                                    selected[existing.map(|p| p.category) == Some(category)] {
                                    (category.label())
                                }
                            }
                        }
                    }
                    label { "Resumo (em branco para derivar do conteúdo)"
                        textarea name="excerpt" rows="2" {
                            @if let Some(post) = existing { (post.excerpt) }
                        }
                    }
                    label { "Conteúdo (parágrafos separados por linha em branco)"
                        textarea name="content" rows="18" required {
                            @if let Some(post) = existing { (post.content) }
                        }
                    }
                    label { "FAQ (JSON: [{\"question\": ..., \"answer\": ...}])"
                        textarea name="faq" rows="4" { (faq_json) }
                    }
                }

                fieldset {
                    legend { "Autor" }
                    label { "Nome"
                        input type="text" name="author"
                            value=[existing.map(|p| p.author.as_str())];
                    }
                    label { "Bio"
                        textarea name="author_bio" rows="2" {
                            @if let Some(post) = existing {
                                @if let Some(bio) = &post.author_bio { (bio) }
                            }
                        }
                    }
                    label { "Tempo de leitura em minutos (em branco para estimar)"
                        input type="number" name="reading_time" min="1"
                            value=[existing.and_then(|p| p.reading_time)];
                    }
                }

                fieldset {
                    legend { "SEO" }
                    label { "Meta título"
                        input type="text" name="meta_title"
                            value=[existing.and_then(|p| p.meta_title.as_deref())];
                    }
                    label { "Meta descrição"
                        input type="text" name="meta_description"
                            value=[existing.and_then(|p| p.meta_description.as_deref())];
                    }
                    label { "Palavras-chave (separadas por vírgula)"
                        input type="text" name="keywords"
                            value=[existing.map(|p| p.keywords.join(", "))];
                    }
                    label { "URL canônica (opcional)"
                        input type="url" name="canonical_url"
                            value=[existing.and_then(|p| p.canonical_url.as_deref())];
                    }
                    label { "Capa (URL, use o upload abaixo)"
                        input type="text" name="cover_image" id="cover-field"
                            value=[existing.and_then(|p| p.cover_image.as_deref())];
                    }
                    input type="file" id="image-picker" accept="image/jpeg,image/png,image/webp"
                        data-endpoint="/api/upload?tipo=posts";
                    label { "Imagem OG (opcional)"
                        input type="text" name="og_image"
                            value=[existing.and_then(|p| p.og_image.as_deref())];
                    }
                    script src="/static/upload.js" defer {}
                }

                fieldset {
                    legend { "Publicação" }
                    label class="checkbox" {
                        input type="checkbox" name="featured"
                            checked[existing.map(|p| p.featured).unwrap_or(false)];
                        "Destaque"
                    }
                    label class="checkbox" {
                        input type="checkbox" name="published"
                            checked[existing.map(|p| p.published).unwrap_or(false)];
                        "Publicado"
                    }
                }

                button type="submit" { "Salvar" }
            }
        },
    )
}
