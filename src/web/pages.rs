//! Server-rendered pages: header/footer chrome, home, about and search.

use crate::api::AppResult;
use crate::category::CategoryFilter;
use crate::render::{analysis_to_html, failure_message, match_label, results_heading};
use crate::session::{EXAMPLE_QUERIES, SearchForm, SearchSnapshot, SearchState};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Link that fills the search form without searching.
pub fn search_href(query: &str, category: CategoryFilter) -> String {
    format!(
        "/search?query={}&category={}",
        urlencoding::encode(query),
        urlencoding::encode(category.param_value())
    )
}

fn header_html() -> &'static str {
    r#"<header class="site-header">
  <a href="/" class="logo"><span class="logo-mark">&#128269;</span> AppSense</a>
  <nav>
    <a href="/">Ana Sayfa</a>
    <a href="/search">Arama</a>
    <a href="/about">Hakkında</a>
  </nav>
</header>"#
}

fn footer_html() -> &'static str {
    r#"<footer class="site-footer">
  <p><strong>AppSense</strong> &middot; LLM + RAG destekli akıllı uygulama arama motoru</p>
  <nav>
    <a href="/">Ana Sayfa</a>
    <a href="/search">Arama</a>
    <a href="/about">Hakkında</a>
  </nav>
</footer>"#
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="tr">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | AppSense</title>
  <link rel="stylesheet" href="/static/app.css">
</head>
<body>
{header}
<main>
{body}
</main>
{footer}
</body>
</html>"#,
        title = escape_html(title),
        header = header_html(),
        footer = footer_html(),
    )
}

pub fn home_page() -> String {
    let body = r#"<section class="hero">
  <h1>Akıllı Uygulama <span class="accent">Arama Motoru</span></h1>
  <p>LLM + RAG teknolojisi ile doğal dil kullanarak uygulama mağazalarından en uygun uygulamaları bulun.
  "Koşu için offline GPS uygulaması" gibi sorgularla akıllı sonuçlar alın.</p>
  <a class="button" href="/search">Hemen Ara</a>
</section>
<section class="features">
  <h2>Neden AppSense?</h2>
  <div class="grid">
    <div class="card"><h3>AI Destekli Arama</h3><p>LLM teknolojisi ile anlamlı ve kişiselleştirilmiş uygulama önerileri</p></div>
    <div class="card"><h3>Hızlı Sonuçlar</h3><p>Vektör veritabanı ile milisaniyeler içinde benzer uygulamalar bulun</p></div>
    <div class="card"><h3>Çok Dilli Destek</h3><p>Otomatik dil algılama ile her dilde arama yapabilirsiniz</p></div>
  </div>
</section>
<section class="how">
  <h2>Nasıl Çalışır?</h2>
  <ol>
    <li>İhtiyacınızı doğal dilde yazın.</li>
    <li>Sorgunuz vektör veritabanında benzer uygulamalarla eşleştirilir.</li>
    <li>LLM sonuçları analiz eder ve size özel öneriler sunar.</li>
  </ol>
</section>"#;
    layout("Ana Sayfa", body)
}

pub fn about_page() -> String {
    let body = r#"<section class="about">
  <h1>AppSense Hakkında</h1>
  <p>AppSense, uygulama mağazalarındaki milyonlarca uygulama arasından ihtiyacınıza en uygun olanları
  doğal dil sorgularıyla bulmanızı sağlayan akıllı bir arama motorudur.</p>
  <h2>Teknolojiler</h2>
  <ul>
    <li>Çok dilli cümle gömmeleri ile anlamsal arama</li>
    <li>Vektör veritabanı ile benzerlik araması</li>
    <li>Büyük dil modeli ile sonuç analizi</li>
  </ul>
</section>"#;
    layout("Hakkında", body)
}

fn search_form_html(form: &SearchForm, loading: bool) -> String {
    let options: String = CategoryFilter::ALL
        .iter()
        .map(|c| {
            let selected = if *c == form.category { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(c.param_value()),
                escape_html(c.label())
            )
        })
        .collect();
    let button = if loading {
        r#"<button type="submit" name="submit" value="1" disabled>Aranıyor...</button>"#
    } else {
        r#"<button type="submit" name="submit" value="1">Ara</button>"#
    };

    format!(
        r#"<section class="search-form">
  <h1>Uygulama Ara</h1>
  <form method="get" action="/search">
    <input type="text" name="query" value="{query}" placeholder="Örn: Koşu için offline GPS uygulaması..." autofocus>
    <label>Kategori: <select name="category">{options}</select></label>
    {button}
  </form>
</section>"#,
        query = escape_html(&form.query),
    )
}

fn card_html(app: &AppResult) -> String {
    let rating = app
        .rating
        .map(|r| format!(r#"<span class="rating">&#9733; {r:.1}</span>"#))
        .unwrap_or_default();
    let downloads = app
        .download_count
        .as_deref()
        .map(|d| format!(r#"<span class="downloads">&#11015; {}</span>"#, escape_html(d)))
        .unwrap_or_default();
    let price = app
        .price
        .as_deref()
        .map(|p| format!(r#"<span class="price">{}</span>"#, escape_html(p)))
        .unwrap_or_default();

    format!(
        r#"<article class="card result" data-id="{id}">
  <div class="card-head"><div><h3>{name}</h3><p class="developer">{developer}</p></div>{rating}</div>
  <p class="description">{description}</p>
  <div class="card-meta"><span class="badge">{category}</span>{downloads}</div>
  <div class="card-foot">{price}<span class="match">{matched}</span></div>
</article>"#,
        id = escape_html(&app.id),
        name = escape_html(&app.name),
        developer = escape_html(&app.developer),
        description = escape_html(&app.description),
        category = escape_html(&app.category),
        matched = escape_html(&match_label(app.similarity_score)),
    )
}

fn examples_html(category: CategoryFilter) -> String {
    let links: String = EXAMPLE_QUERIES
        .iter()
        .map(|example| {
            format!(
                r#"<a class="example" href="{}">{}</a>"#,
                escape_html(&search_href(example, category)),
                escape_html(example)
            )
        })
        .collect();
    format!(
        r#"<section class="examples">
  <h3>Örnek Arama Sorguları</h3>
  <div class="grid">{links}</div>
</section>"#
    )
}

fn snapshot_html(snapshot: &SearchSnapshot) -> String {
    let mut html = String::new();
    if !snapshot.analysis.trim().is_empty() {
        html.push_str(&format!(
            r#"<section class="analysis"><h3>AI Analizi</h3><div class="prose">{}</div></section>"#,
            analysis_to_html(&snapshot.analysis)
        ));
    }
    if !snapshot.results.is_empty() {
        let cards: String = snapshot.results.iter().map(card_html).collect();
        html.push_str(&format!(
            r#"<section class="results"><h2>{}</h2><div class="grid">{cards}</div></section>"#,
            escape_html(&results_heading(snapshot.results.len()))
        ));
    }
    html
}

pub fn search_page(form: &SearchForm, state: &SearchState) -> String {
    let mut body = search_form_html(form, state.is_loading());

    match state {
        SearchState::Idle => body.push_str(&examples_html(form.category)),
        SearchState::Loading => {}
        SearchState::Populated(snapshot) => {
            body.push_str(&snapshot_html(snapshot));
            if snapshot.results.is_empty() {
                body.push_str(&examples_html(form.category));
            }
        }
        SearchState::Failed(failure) => {
            body.push_str(&format!(
                r#"<div class="alert error" role="alert">{}</div>"#,
                escape_html(&failure_message(failure))
            ));
            body.push_str(&examples_html(form.category));
        }
    }

    layout("Arama", &body)
}
