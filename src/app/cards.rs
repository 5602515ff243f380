//! Demo item source: a deck of text cards of varying heights.

use ratatui::text::{Line, Span};

use crate::ui::list_view::ListAdapter;
use crate::ui::theme::Theme;

/// One list item: a title row plus a few body rows.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub body: Vec<String>,
}

/// The backing item collection handed to the widget as its adapter.
#[derive(Debug, Clone, Default)]
pub struct CardDeck {
    cards: Vec<Card>,
}

impl CardDeck {
    /// Generate `count` cards with body heights cycling 1–4 rows, offset by
    /// `seed` so regenerating produces visibly different content.
    pub fn generate(count: usize, seed: usize) -> Self {
        let cards = (0..count)
            .map(|i| {
                let body_rows = (i + seed) % 4 + 1;
                Card {
                    title: format!("Card {:>3}", i + 1),
                    body: (0..body_rows)
                        .map(|r| format!("line {} of {body_rows}", r + 1))
                        .collect(),
                }
            })
            .collect();
        Self { cards }
    }
}

impl ListAdapter for CardDeck {
    fn len(&self) -> usize {
        self.cards.len()
    }

    fn height_of(&self, index: usize) -> u16 {
        1 + self.cards[index].body.len() as u16
    }

    fn render_line(&self, index: usize, line: u16, _width: u16) -> Line<'_> {
        let card = &self.cards[index];
        if line == 0 {
            Line::from(Span::styled(card.title.as_str(), Theme::card_title_style()))
        } else {
            let body = card
                .body
                .get(usize::from(line) - 1)
                .map(String::as_str)
                .unwrap_or("");
            Line::from(Span::styled(format!("  {body}"), Theme::card_body_style()))
        }
    }
}
