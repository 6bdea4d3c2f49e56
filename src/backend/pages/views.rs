//! HTML views.
//!
//! Every page is a maud template wrapped in `layout`. maud escapes all
//! interpolated values, so user-supplied titles, descriptions and comment
//! bodies render as text.

use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

use crate::backend::auth::users::User;
use crate::shared::{Photo, PhotoWithComments};

/// Page chrome shared by every view
pub fn layout(title: &str, user: Option<&User>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | SnapShare" }
                link rel="stylesheet" href="/css/style.css";
            }
            body {
                nav {
                    a href="/" { "SnapShare" }
                    @if let Some(user) = user {
                        a href="/profile" { (user.username) }
                        a href="/logout" { "Log out" }
                    } @else {
                        a href="/login" { "Log in" }
                        a href="/signup" { "Sign up" }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn flash_message(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p.flash role="alert" { (message) }
        }
    }
}

/// Photo list with the upload form for logged-in users
pub fn index_page(user: Option<&User>, photos: &[Photo], flash: Option<&str>) -> Markup {
    let content = html! {
        h1 { "Photos" }
        (flash_message(flash))
        @if photos.is_empty() {
            p.empty { "No photos yet." }
        } @else {
            ul.photos {
                @for photo in photos {
                    li {
                        a href={ "/photos/" (photo.id.to_string()) } {
                            img src=(photo.image_url) alt=(photo.title);
                            span.title { (photo.title) }
                        }
                        span.count { (photo.comments.len()) " comments" }
                    }
                }
            }
        }
        @if user.is_some() {
            section.upload {
                h2 { "Share a photo" }
                form method="post" action="/photos" {
                    label { "Title" input type="text" name="title" required; }
                    label { "Image URL" input type="text" name="image_url" required; }
                    label { "Description" textarea name="description" {} }
                    button type="submit" { "Share" }
                }
            }
        }
    };
    layout("Photos", user, content)
}

/// Registration form
pub fn signup_page(flash: Option<&str>) -> Markup {
    let content = html! {
        h1 { "Sign up" }
        (flash_message(flash))
        form method="post" action="/signup" {
            label { "Username" input type="text" name="username" required; }
            label { "Password" input type="password" name="password" required; }
            button type="submit" { "Create account" }
        }
        p { "Already registered? " a href="/login" { "Log in" } }
    };
    layout("Sign up", None, content)
}

/// Login form
pub fn login_page(flash: Option<&str>) -> Markup {
    let content = html! {
        h1 { "Log in" }
        (flash_message(flash))
        form method="post" action="/login" {
            label { "Username" input type="text" name="username" required; }
            label { "Password" input type="password" name="password" required; }
            button type="submit" { "Log in" }
        }
        p { "New here? " a href="/signup" { "Sign up" } }
    };
    layout("Log in", None, content)
}

/// Profile of the logged-in user
pub fn profile_page(user: &User) -> Markup {
    let content = html! {
        h1 { (user.username) }
        p { "Member since " (user.created_at.format("%B %-d, %Y").to_string()) }
        p { a href="/" { "Browse photos" } }
    };
    layout("Profile", Some(user), content)
}

/// One photo with its comments and the comment form
pub fn photo_page(user: Option<&User>, photo: &PhotoWithComments, flash: Option<&str>) -> Markup {
    let content = html! {
        article.photo {
            h1 { (photo.title) }
            img src=(photo.image_url) alt=(photo.title);
            @if let Some(description) = &photo.description {
                p.description { (description) }
            }
        }
        section.comments {
            h2 { "Comments" }
            (flash_message(flash))
            @if photo.comments.is_empty() {
                p.empty { "No comments yet." }
            }
            ol {
                @for comment in &photo.comments {
                    @match comment {
                        Some(comment) => {
                            li {
                                p { (comment.body) }
                                small {
                                    (comment.author.as_deref().unwrap_or("anonymous"))
                                    " · "
                                    (comment.created_at.format("%Y-%m-%d %H:%M").to_string())
                                }
                            }
                        }
                        None => {
                            li.missing { "This comment is no longer available." }
                        }
                    }
                }
            }
            form method="post" action={ "/photos/" (photo.id.to_string()) "/comments" } {
                label { "Comment" textarea name="body" required {} }
                button type="submit" { "Post" }
            }
        }
    };
    layout(&photo.title, user, content)
}

/// Error page for a failed page request
pub fn error_page(status: StatusCode, user: Option<&User>, message: &str) -> Markup {
    let content = html! {
        h1 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
        p { (message) }
        p { a href="/" { "Back to photos" } }
    };
    layout("Error", user, content)
}
