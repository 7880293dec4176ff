/// Склеивает текст выписки в одну строку.
///
/// Любая последовательность пробельных символов (в том числе переносы строк
/// после извлечения текста из PDF) заменяется одним пробелом.
pub fn flatten_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
