//! Server-rendered HTML pages and htmx fragments / 服务端渲染页面与片段

use crate::models::{CreateVocabRequest, Vocab};

/// Client event fired after rows change so the lazy count reloads
pub const VOCABS_CHANGED_EVENT: &str = "vocabsChanged";

/// Escape text for HTML body and attribute context / HTML 转义
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} · Vocab</title>
    <link rel="stylesheet" href="/static/app.css">
    <script src="https://unpkg.com/htmx.org@2.0.3"></script>
    <script src="/static/app.js" defer></script>
</head>
<body>
    <main class="container">
{body}
    </main>
</body>
</html>"#,
        title = escape(title),
        body = body,
    )
}

fn format_zipf(zipf: Option<f64>) -> String {
    zipf.map(|z| format!("{:.2}", z)).unwrap_or_default()
}

/// One table row / 单行
pub fn vocab_row(vocab: &Vocab) -> String {
    format!(
        r#"<tr id="vocab-{id}">
    <td><input type="checkbox" name="id" value="{id}" aria-label="Select {word}"></td>
    <td class="word">{word}</td>
    <td class="context">{context}</td>
    <td class="source">{source}</td>
    <td class="zipf">{zipf}</td>
    <td><button type="button" class="link" hx-delete="/vocabs/{id}" hx-target="closest tr" hx-swap="outerHTML">Delete</button></td>
</tr>"#,
        id = vocab.id,
        word = escape(&vocab.word),
        context = escape(vocab.context.as_deref().unwrap_or("")),
        source = escape(vocab.source.as_deref().unwrap_or("")),
        zipf = format_zipf(vocab.zipf),
    )
}

/// Contents of `<tbody id="vocab-rows">` / 表格主体片段
pub fn vocab_rows(vocabs: &[Vocab], query: Option<&str>) -> String {
    if vocabs.is_empty() {
        let message = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => format!("No vocabs match \"{}\"", escape(q)),
            None => "No vocabs yet".to_string(),
        };
        return format!(r#"<tr class="empty"><td colspan="6">{}</td></tr>"#, message);
    }

    vocabs.iter().map(vocab_row).collect::<Vec<_>>().join("\n")
}

pub fn count_fragment(count: i64) -> String {
    let noun = if count == 1 { "vocab" } else { "vocabs" };
    format!("{} {}", count, noun)
}

/// Full list page / 列表页
pub fn vocabs_page(vocabs: &[Vocab], query: Option<&str>) -> String {
    let body = format!(
        r##"<header class="page-header">
    <h1>Vocabulary</h1>
    <span id="vocab-count" hx-get="/vocabs/count" hx-trigger="revealed, {event} from:body">&hellip;</span>
    <a class="button" href="/vocabs/new">Add Vocab</a>
</header>
<div class="toolbar">
    <input type="search" name="q" value="{q}" placeholder="Search words..." autocomplete="off"
        hx-get="/vocabs" hx-trigger="input changed delay:300ms, search" hx-target="#vocab-rows" hx-push-url="true">
    <button type="button" id="delete-selected" class="danger" disabled
        hx-delete="/vocabs" hx-include="#vocab-rows input[name='id']:checked, input[name='q']"
        hx-target="#vocab-rows" hx-confirm="Delete the selected vocabs?">Delete selected</button>
</div>
<div id="vocab-errors" role="alert"></div>
<table class="vocabs">
    <thead>
        <tr>
            <th><input type="checkbox" id="select-all" aria-label="Select all"></th>
            <th>Word</th>
            <th>Context</th>
            <th>Source</th>
            <th>Zipf</th>
            <th></th>
        </tr>
    </thead>
    <tbody id="vocab-rows">
{rows}
    </tbody>
</table>"##,
        event = VOCABS_CHANGED_EVENT,
        q = escape(query.unwrap_or("")),
        rows = vocab_rows(vocabs, query),
    );
    layout("Vocabs", &body)
}

/// "Add Vocab" form, optionally with a validation error / 新增词汇表单
pub fn new_vocab_page(form: &CreateVocabRequest, error: Option<&str>) -> String {
    let error_html = error.map(error_fragment).unwrap_or_default();
    let body = format!(
        r#"<header class="page-header">
    <h1>Add Vocab</h1>
    <a href="/vocabs">Back to list</a>
</header>
{error}
<form method="post" action="/vocabs" class="vocab-form">
    <label>Word <input type="text" name="word" value="{word}" required maxlength="200" autofocus></label>
    <label>Context <textarea name="context" rows="3">{context}</textarea></label>
    <label>Source <input type="text" name="source" value="{source}"></label>
    <label>Zipf <input type="number" name="zipf" value="{zipf}" step="0.01" min="0"></label>
    <button type="submit">Save</button>
</form>"#,
        error = error_html,
        word = escape(&form.word),
        context = escape(form.context.as_deref().unwrap_or("")),
        source = escape(form.source.as_deref().unwrap_or("")),
        zipf = escape(form.zipf.as_deref().unwrap_or("")),
    );
    layout("Add Vocab", &body)
}

pub fn error_fragment(message: &str) -> String {
    format!(r#"<div class="error" role="alert">{}</div>"#, escape(message))
}
