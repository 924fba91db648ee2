//! Ordering players by a month total.

use serde::{Deserialize, Serialize};

use super::month_total;
use crate::calendar::CalendarMapper;
use crate::models::{DateMeta, DayKey, DisplayMonthId, Player};

/// Sort direction for a month column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Desc => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
        }
    }
}

/// Which month column the table is sorted by, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub month: Option<DisplayMonthId>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(month: DisplayMonthId, direction: SortDirection) -> Self {
        Self {
            month: Some(month),
            direction,
        }
    }

    /// Select a month column: the active one flips direction, any other
    /// becomes active sorted descending.
    pub fn select(&mut self, month: DisplayMonthId) {
        if self.month.as_ref() == Some(&month) {
            self.direction = self.direction.flipped();
        } else {
            self.month = Some(month);
            self.direction = SortDirection::Desc;
        }
    }
}

/// Order players by their total for `month`.
///
/// With no month the input order is returned unchanged. The sort is stable
/// in both directions: players with equal totals keep their relative order.
pub fn sort_players<'a, C>(
    players: &'a [Player],
    month: Option<&DisplayMonthId>,
    direction: SortDirection,
    catalog: &[DateMeta],
    today: &DayKey,
    calendar: &C,
) -> Vec<&'a Player>
where
    C: CalendarMapper + ?Sized,
{
    let Some(month) = month else {
        return players.iter().collect();
    };

    let mut keyed: Vec<(u64, &Player)> = players
        .iter()
        .map(|p| (month_total(p, month, catalog, today, calendar), p))
        .collect();

    match direction {
        SortDirection::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
        SortDirection::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    keyed.into_iter().map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::build_catalog;
    use crate::calendar::PersianCalendar;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn player(name: &str, wins: &[(&str, u32)]) -> Player {
        let mut p = Player::new(name);
        for (d, w) in wins {
            p.wins_by_date.insert(day(d), *w);
        }
        p
    }

    fn names(players: &[&Player]) -> Vec<String> {
        players.iter().map(|p| p.name.clone()).collect()
    }

    fn fixture() -> (Vec<Player>, Vec<DateMeta>) {
        let players = vec![
            player("A", &[("2024-10-13", 1), ("2024-11-01", 9)]),
            player("B", &[("2024-10-13", 5), ("2024-11-01", 0)]),
            player("C", &[("2024-10-13", 1), ("2024-11-01", 2)]),
            player("D", &[("2024-10-13", 3)]),
        ];
        let keys = vec![day("2024-10-13"), day("2024-11-01")];
        let catalog = build_catalog(&keys, &PersianCalendar::new());
        (players, catalog)
    }

    #[test]
    fn test_no_month_keeps_insertion_order() {
        let (players, catalog) = fixture();
        let sorted = sort_players(
            &players,
            None,
            SortDirection::Asc,
            &catalog,
            &day("2025-01-01"),
            &PersianCalendar::new(),
        );
        assert_eq!(names(&sorted), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_sort_descending() {
        let (players, catalog) = fixture();
        let month = DisplayMonthId::from("07");
        let sorted = sort_players(
            &players,
            Some(&month),
            SortDirection::Desc,
            &catalog,
            &day("2025-01-01"),
            &PersianCalendar::new(),
        );
        // A and C tie on 1 and keep their relative order.
        assert_eq!(names(&sorted), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_sort_ascending_is_stable() {
        let (players, catalog) = fixture();
        let month = DisplayMonthId::from("07");
        let sorted = sort_players(
            &players,
            Some(&month),
            SortDirection::Asc,
            &catalog,
            &day("2025-01-01"),
            &PersianCalendar::new(),
        );
        assert_eq!(names(&sorted), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn test_sort_uses_truncated_totals() {
        let (players, catalog) = fixture();
        let month = DisplayMonthId::from("08");
        // Today sits in Aban before 2024-11-01, so every Aban total is 0.
        let sorted = sort_players(
            &players,
            Some(&month),
            SortDirection::Desc,
            &catalog,
            &day("2024-10-25"),
            &PersianCalendar::new(),
        );
        assert_eq!(names(&sorted), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_select_toggles_same_month() {
        let mut state = SortState::default();
        state.select("07".into());
        assert_eq!(state, SortState::by("07".into(), SortDirection::Desc));

        state.select("07".into());
        assert_eq!(state.direction, SortDirection::Asc);

        state.select("07".into());
        assert_eq!(state.direction, SortDirection::Desc);
    }

    #[test]
    fn test_select_new_month_resets_direction() {
        let mut state = SortState::by("07".into(), SortDirection::Asc);
        state.select("08".into());
        assert_eq!(state, SortState::by("08".into(), SortDirection::Desc));
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"desc\"");
        let parsed: SortDirection = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(parsed, SortDirection::Asc);
    }
}
