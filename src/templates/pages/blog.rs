use crate::config::SiteConfig;
use crate::domain::blog::{BlogCategory, BlogPost, BlogPostSummary};
use crate::seo;
use crate::templates::components::blog_card;
use crate::templates::layouts::{site_layout, PageMeta};
use maud::{html, Markup};

pub fn blog_list_page(
    cfg: &SiteConfig,
    active_category: Option<BlogCategory>,
    search: Option<&str>,
    posts: &[BlogPostSummary],
) -> Markup {
    let meta = PageMeta::new(
        seo::page_title(cfg, "Blog"),
        "Artigos sobre mercado imobiliário, financiamento e dicas para compradores.",
        seo::canonical(cfg, "/blog", None),
    )
    .with_json_ld(seo::breadcrumbs(cfg, &[("Início", "/"), ("Blog", "/blog")]));

    site_layout(
        cfg,
        &meta,
        html! {
            section class="blog-index" {
                h1 { "Blog" }

                nav class="categories" {
                    ul {
                        li .active[active_category.is_none()] {
                            a href="/blog" { "Todos" }
                        }
                        @for category in BlogCategory::all() {
                            li .active[active_category == Some(category)] {
                                a href={ "/blog?categoria=" (category.as_str()) } {
                                    (category.label())
                                }
                            }
                        }
                    }
                }

                form class="blog-search" method="get" action="/blog" {
                    input type="search" name="busca" placeholder="Buscar artigos"
                        value=[search];
                    button type="submit" { "Buscar" }
                }

                @if posts.is_empty() {
                    p class="empty" { "Nenhum artigo encontrado." }
                } @else {
                    div class="card-grid" {
                        @for post in posts {
                            (blog_card(post))
                        }
                    }
                }
            }
        },
    )
}

pub fn blog_post_page(cfg: &SiteConfig, post: &BlogPost) -> Markup {
    let path = format!("/blog/{}", post.slug);
    let mut meta = PageMeta::new(
        post.meta_title
            .clone()
            .unwrap_or_else(|| seo::page_title(cfg, &post.title)),
        post.meta_description.clone().unwrap_or_else(|| post.excerpt.clone()),
        seo::canonical(cfg, &path, post.canonical_url.as_deref()),
    )
    .with_json_ld(seo::blog_post(cfg, post))
    .with_json_ld(seo::breadcrumbs(
        cfg,
        &[("Início", "/"), ("Blog", "/blog"), (&post.title, &path)],
    ));
    if let Some(faq) = seo::faq(&post.faq) {
        meta = meta.with_json_ld(faq);
    }
    if let Some(og) = post.og_image.as_deref().or(post.cover_image.as_deref()) {
        meta = meta.with_og_image(og);
    }

    site_layout(
        cfg,
        &meta,
        html! {
            article class="blog-post" {
                header {
                    span class="badge" { (post.category.label()) }
                    h1 { (post.title) }
                    p class="byline" {
                        (post.author)
                        @if let Some(published_at) = post.published_at {
                            " · " (published_at.format("%d/%m/%Y").to_string())
                        }
                        @if let Some(minutes) = post.reading_time {
                            " · " (minutes) " min de leitura"
                        }
                    }
                    @if let Some(cover) = &post.cover_image {
                        img src=(cover) alt=(post.title);
                    }
                }

                section class="content" {
                    @for paragraph in post.content.split("\n\n") {
                        p { (paragraph) }
                    }
                }

                @if !post.faq.is_empty() {
                    section class="faq" {
                        h2 { "Perguntas frequentes" }
                        @for entry in &post.faq {
                            details {
                                summary { (entry.question) }
                                p { (entry.answer) }
                            }
                        }
                    }
                }

                @if let Some(bio) = &post.author_bio {
                    footer class="author-bio" {
                        h3 { "Sobre " (post.author) }
                        p { (bio) }
                    }
                }
            }
        },
    )
}
