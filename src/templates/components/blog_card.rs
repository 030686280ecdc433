use crate::domain::blog::BlogPostSummary;
use maud::{html, Markup};

pub fn blog_card(post: &BlogPostSummary) -> Markup {
    let href = format!("/blog/{}", post.slug);
    html! {
        article class="blog-card" {
            a href=(href) {
                @if let Some(cover) = &post.cover_image {
                    img src=(cover) alt=(post.title) loading="lazy";
                }
                div class="card-body" {
                    span class="badge" { (post.category.label()) }
                    h3 { (post.title) }
                    p { (post.excerpt) }
                    p class="byline" {
                        (post.author)
                        @if let Some(minutes) = post.reading_time {
                            " · " (minutes) " min de leitura"
                        }
                    }
                }
            }
        }
    }
}
