use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Dish;
use crate::pricing::sanitize_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortOrder {
    /// Value of the `sortOrder` query parameter, if one is sent at all.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            SortOrder::None => None,
            SortOrder::Asc => Some("asc"),
            SortOrder::Desc => Some("desc"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query().unwrap_or("none"))
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortOrder::None),
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}', expected asc, desc or none", other)),
        }
    }
}

/// Stable sort by unit price; dishes without a price sort as free.
pub fn sort_by_price(dishes: &mut [Dish], order: SortOrder) {
    let cmp = |a: &Dish, b: &Dish| -> Ordering {
        sanitize_price(a.price).cmp(&sanitize_price(b.price))
    };
    match order {
        SortOrder::None => {}
        SortOrder::Asc => dishes.sort_by(cmp),
        SortOrder::Desc => dishes.sort_by(|a, b| cmp(b, a)),
    }
}

pub fn filter_by_category(dishes: Vec<Dish>, category_id: &str) -> Vec<Dish> {
    dishes
        .into_iter()
        .filter(|d| d.category_id() == Some(category_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Ref};
    use rust_decimal::Decimal;

    fn dish(id: &str, price: Option<i64>, category: Option<&str>) -> Dish {
        let mut d = Dish::new(id, id, Decimal::ZERO);
        d.price = price.map(Decimal::from);
        d.category = category.map(|c| Ref::Id(c.to_string()));
        d
    }

    fn ids(dishes: &[Dish]) -> Vec<&str> {
        dishes.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_price() {
        let mut dishes = vec![
            dish("a", Some(30), None),
            dish("b", None, None),
            dish("c", Some(10), None),
        ];

        sort_by_price(&mut dishes, SortOrder::None);
        assert_eq!(ids(&dishes), vec!["a", "b", "c"]);

        sort_by_price(&mut dishes, SortOrder::Asc);
        assert_eq!(ids(&dishes), vec!["b", "c", "a"]);

        sort_by_price(&mut dishes, SortOrder::Desc);
        assert_eq!(ids(&dishes), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_filter_by_category_handles_embedded_categories() {
        let mut embedded = dish("x", Some(5), None);
        embedded.category = Some(Ref::Doc(Category {
            id: "c1".to_string(),
            name: "Starters".to_string(),
            description: None,
            image: Vec::new(),
        }));
        let dishes = vec![
            dish("a", Some(1), Some("c1")),
            dish("b", Some(1), Some("c2")),
            embedded,
            dish("d", None, None),
        ];
        assert_eq!(ids(&filter_by_category(dishes, "c1")), vec!["a", "x"]);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("none".parse::<SortOrder>().unwrap(), SortOrder::None);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Asc.as_query(), Some("asc"));
        assert_eq!(SortOrder::None.to_string(), "none");
    }
}
