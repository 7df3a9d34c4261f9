use super::constants::ELLIPSIS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub tile_width: usize,
}

impl GridLayout {
    pub fn new(columns: usize, tile_width: usize) -> Self {
        Self {
            columns: columns.max(1),
            tile_width,
        }
    }

    /// Splits `urls` into rows of at most `columns` tile labels, preserving order.
    ///
    /// Each label is the 1-based tile number followed by the URL, fitted to the tile width.
    pub fn rows(&self, urls: &[String]) -> Vec<Vec<String>> {
        urls.chunks(self.columns)
            .enumerate()
            .map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(col, url)| self.label_for(row * self.columns + col + 1, url))
                    .collect()
            })
            .collect()
    }

    fn label_for(&self, number: usize, url: &str) -> String {
        let text = format!("{number} {}", display_url(url));
        fit(&text, self.tile_width)
    }
}

fn display_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Truncates to `width` chars (ellipsis included) and pads to exactly `width`.
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text:<width$}");
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(&ELLIPSIS[..width.min(ELLIPSIS.len())]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://img/{i}.jpg")).collect()
    }

    #[test]
    fn rows_fill_left_to_right() {
        let layout = GridLayout::new(3, 20);
        let rows = layout.rows(&urls(5));

        let trimmed: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(|label| label.trim_end()).collect())
            .collect();
        assert_eq!(
            trimmed,
            vec![
                vec!["1 img/1.jpg", "2 img/2.jpg", "3 img/3.jpg"],
                vec!["4 img/4.jpg", "5 img/5.jpg"],
            ]
        );
        assert!(rows.iter().flatten().all(|label| label.chars().count() == 20));
    }

    #[test]
    fn fit_truncates_and_pads() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefghij", 8), "abcde...");
        assert_eq!(fit("ééééé", 4), "é...");
    }

    #[test]
    fn empty_list_has_no_rows() {
        assert!(GridLayout::new(3, 10).rows(&[]).is_empty());
    }
}
