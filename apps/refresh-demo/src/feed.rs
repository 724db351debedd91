//! Row model backing the demo list.

pub const ROW_HEIGHT: f32 = 24.0;

#[derive(Debug, Default)]
pub struct Feed {
    rows: Vec<String>,
    fetched: usize,
}

impl Feed {
    pub fn with_rows(count: usize) -> Self {
        Self {
            rows: (0..count).map(|index| format!("row {index}")).collect(),
            fetched: 0,
        }
    }

    /// Inserts `count` fresh rows at the top.
    pub fn prepend(&mut self, count: usize) {
        let fresh: Vec<String> = (0..count).map(|_| self.next_row("new")).collect();
        self.rows.splice(0..0, fresh);
    }

    /// Adds `count` older rows at the bottom.
    pub fn append(&mut self, count: usize) {
        for _ in 0..count {
            let row = self.next_row("older");
            self.rows.push(row);
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn first(&self) -> Option<&str> {
        self.rows.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.rows.last().map(String::as_str)
    }

    pub fn content_height(&self) -> f32 {
        self.rows.len() as f32 * ROW_HEIGHT
    }

    fn next_row(&mut self, kind: &str) -> String {
        self.fetched += 1;
        format!("{kind} row #{}", self.fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_and_append_grow_the_content() {
        let mut feed = Feed::with_rows(50);
        assert_eq!(feed.content_height(), 1200.0);

        feed.prepend(5);
        assert_eq!(feed.row_count(), 55);
        assert_eq!(feed.first(), Some("new row #1"));

        feed.append(5);
        assert_eq!(feed.row_count(), 60);
        assert_eq!(feed.last(), Some("older row #10"));
        assert_eq!(feed.content_height(), 60.0 * ROW_HEIGHT);
    }
}
