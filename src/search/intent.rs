//! Intent parser - keyword / regex matching over free text / 意图解析
//!
//! Rule families, applied in order on the lowercased query. Text consumed by
//! one rule is blanked out so later rules do not see it again:
//! - explicit price range ("between 800 and 1200", "800-1200 DZD")
//! - upper bound ("under 1000 DZD") / lower bound ("over 1500")
//! - price tiers ("cheap", "mid-range", "premium"), only for unset bounds
//! - cuisines ("italian" -> restaurant terms)
//! - known restaurant names
//! - food keywords ("pizza", "curries", ...)
//! - fallback: leftover words become name-substring terms

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Amount: "1000", "1,500", "1 500", "1.5" with optional "k" suffix
const NUM: &str = r"(\d{1,3}(?:[, ]\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)(k\b)?";
/// Optional currency word
const CUR: &str = r"(?:\s*(?:dzd|da|dinars?)\b)?";

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:between|from)\s+{NUM}{CUR}\s*(?:and|to|-)\s*{NUM}{CUR}"))
        .expect("valid range regex")
});

static DASH_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b{NUM}\s*(?:-|to)\s*{NUM}\s*(?:dzd|da|dinars?)\b"))
        .expect("valid dash range regex")
});

static MAX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:\b(?:under|below|less than|cheaper than|at most|up to|no more than|maximum|max|within)\b|<=?)\s*(?:of\s+)?{NUM}{CUR}"
    ))
    .expect("valid max regex")
});

static MIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:\b(?:over|above|more than|at least|minimum|min|starting at|starting from)\b|>=?)\s*{NUM}{CUR}"
    ))
    .expect("valid min regex")
});

static BUDGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:cheap(?:est)?|budget|affordable|inexpensive|low[- ]cost)\b").expect("valid budget regex")
});

static MID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:mid[- ]?range|moderate(?:ly priced)?|mid[- ]priced)\b").expect("valid mid regex")
});

static PREMIUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:expensive|premium|luxury|fancy|upscale|high[- ]end)\b").expect("valid premium regex")
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][a-z'\-]*").expect("valid word regex"));

/// Cuisine word -> restaurant search terms
const CUISINES: &[(&str, &[&str])] = &[
    ("italian", &["italian", "pizza", "pasta"]),
    ("japanese", &["japanese", "sushi"]),
    ("indian", &["indian", "spice"]),
    ("pakistani", &["pakistani"]),
    ("american", &["american", "burger"]),
    ("mediterranean", &["mediterranean"]),
    ("greek", &["mediterranean", "greek"]),
];

/// Food keyword: regex word, dish name term, menu category term
struct FoodKeyword {
    pattern: &'static str,
    name_term: &'static str,
    category_term: Option<&'static str>,
}

const fn food(pattern: &'static str, name_term: &'static str, category_term: Option<&'static str>) -> FoodKeyword {
    FoodKeyword { pattern, name_term, category_term }
}

const FOODS: &[FoodKeyword] = &[
    food("pizzas?", "pizza", Some("pizza")),
    food("burgers?|hamburgers?", "burger", Some("burger")),
    food("sushi", "sushi", None),
    food("nigiri", "nigiri", Some("nigiri")),
    food("sashimi", "sashimi", Some("sashimi")),
    food("maki", "maki", Some("maki")),
    food("pastas?", "pasta", Some("pasta")),
    food("spaghetti", "spaghetti", None),
    food("lasagnas?|lasagne", "lasagna", None),
    food("risottos?", "risotto", Some("risotto")),
    food("curry|curries", "curry", Some("curr")),
    food("biryanis?", "biryani", None),
    food("tikka", "tikka", None),
    food("korma", "korma", None),
    food("tandoori?", "tandoor", Some("tandoor")),
    food("salads?", "salad", Some("salad")),
    food("desserts?|sweets?", "dessert", Some("dessert")),
    food("soups?", "soup", Some("soup")),
    food("seafood", "seafood", Some("seafood")),
    food("fish", "fish", None),
    food("salmon", "salmon", None),
    food("tuna", "tuna", None),
    food("shrimps?|prawns?", "shrimp", None),
    food("chicken", "chicken", None),
    food("beef", "beef", None),
    food("lamb", "lamb", None),
    food("vegetarian|veggie|vegan", "veg", None),
    food("grill(?:ed)?|bbq", "grill", Some("grill")),
    food("gyros?", "gyros", None),
    food("kebabs?|souvlaki", "souvlaki", None),
    food("cheese", "cheese", None),
    food("rice", "rice", Some("rice")),
    food("breads?|naan", "bread", Some("bread")),
    food("shakes?|milkshakes?", "shake", Some("shake")),
    food("drinks?|beverages?", "drink", Some("beverage")),
    food("appetizers?|starters?", "appetizer", Some("appetizer")),
    food("mezze|meze", "mezze", Some("mezze")),
    food("sandwich(?:es)?", "sandwich", None),
    food("steaks?", "steak", None),
    food("noodles?", "noodle", None),
];

static FOOD_RES: Lazy<Vec<(Regex, &'static FoodKeyword)>> = Lazy::new(|| {
    FOODS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"\b(?:{})\b", kw.pattern)).expect("valid food keyword regex");
            (re, kw)
        })
        .collect()
});

static CUISINE_RES: Lazy<Vec<(Regex, &'static str, &'static [&'static str])>> = Lazy::new(|| {
    CUISINES
        .iter()
        .map(|(word, terms)| {
            let re = Regex::new(&format!(r"\b{}\b", word)).expect("valid cuisine regex");
            (re, *word, *terms)
        })
        .collect()
});

/// Words that never become fallback terms
const STOP_WORDS: &[&str] = &[
    "about", "all", "also", "and", "any", "anything", "are", "available", "can", "cost", "costs",
    "could", "dinar", "dinars", "dish", "dishes", "does", "dzd", "eat", "everything", "find", "food",
    "foods", "for", "from", "get", "give", "good", "have", "hungry", "i'd", "i'm", "items", "just",
    "like", "looking", "meal", "meals", "menu", "menus", "need", "only", "options", "order",
    "please", "price", "priced", "prices", "recommend", "restaurant", "restaurants", "serve",
    "serves", "show", "some", "something", "than", "that", "the", "there", "this", "want", "what",
    "which", "with", "would", "you",
];

/// One matched food keyword / 匹配的菜品关键词
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodTerm {
    pub keyword: String,
    pub name_term: String,
    pub category_term: Option<String>,
}

/// One matched cuisine / 匹配的菜系
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisineTerm {
    pub cuisine: String,
    pub restaurant_terms: Vec<String>,
}

/// Filters extracted from a free-text query / 从查询中提取的过滤条件
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchIntent {
    pub foods: Vec<FoodTerm>,
    pub cuisines: Vec<CuisineTerm>,
    pub restaurants: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub fallback_terms: Vec<String>,
}

impl SearchIntent {
    pub fn has_price(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// No filter at all: the query resolves to nothing
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
            && self.cuisines.is_empty()
            && self.restaurants.is_empty()
            && !self.has_price()
            && self.fallback_terms.is_empty()
    }
}

/// Keyword / regex intent parser / 意图解析器
#[derive(Debug, Clone)]
pub struct IntentParser {
    budget_max_price: f64,
    premium_min_price: f64,
    /// Known restaurant names, lowercased, with their word-bounded matcher
    restaurants: Vec<(String, Regex)>,
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new(800.0, 1300.0)
    }
}

impl IntentParser {
    pub fn new(budget_max_price: f64, premium_min_price: f64) -> Self {
        Self {
            budget_max_price,
            premium_min_price,
            restaurants: Vec::new(),
        }
    }

    /// Restaurant names to recognise in queries / 设置可识别的餐厅名
    pub fn with_restaurants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut restaurants: Vec<(String, Regex)> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .filter_map(|n| match Regex::new(&format!(r"\b{}\b", regex::escape(&n))) {
                Ok(re) => Some((n, re)),
                Err(e) => {
                    tracing::warn!("Skipping restaurant name {:?}: {}", n, e);
                    None
                }
            })
            .collect();
        // Longest first so "pizza palace express" wins over "pizza palace"
        restaurants.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self.restaurants = restaurants;
        self
    }

    pub fn parse(&self, query: &str) -> SearchIntent {
        let mut text = query.to_lowercase();
        let mut intent = SearchIntent::default();

        self.parse_prices(&mut text, &mut intent);

        // Full restaurant names before cuisine words: "mediterranean breeze" is a restaurant
        for (name, re) in &self.restaurants {
            if consume(&mut text, re).is_some() {
                intent.restaurants.push(name.clone());
            }
        }

        for (re, cuisine, terms) in CUISINE_RES.iter() {
            if consume(&mut text, re).is_some() {
                intent.cuisines.push(CuisineTerm {
                    cuisine: cuisine.to_string(),
                    restaurant_terms: terms.iter().map(|t| t.to_string()).collect(),
                });
            }
        }

        for (re, kw) in FOOD_RES.iter() {
            if let Some(groups) = consume(&mut text, re) {
                let keyword = groups.first().cloned().flatten().unwrap_or_else(|| kw.name_term.to_string());
                intent.foods.push(FoodTerm {
                    keyword,
                    name_term: kw.name_term.to_string(),
                    category_term: kw.category_term.map(str::to_string),
                });
            }
        }

        // Leftover words only count when no other rule recognised anything
        if intent.foods.is_empty()
            && intent.cuisines.is_empty()
            && intent.restaurants.is_empty()
            && !intent.has_price()
        {
            intent.fallback_terms = fallback_terms(&text);
        }

        tracing::debug!("Parsed intent for {:?}: {:?}", query, intent);
        intent
    }

    fn parse_prices(&self, text: &mut String, intent: &mut SearchIntent) {
        if let Some(g) = consume(text, &RANGE_RE).or_else(|| consume(text, &DASH_RANGE_RE)) {
            intent.min_price = amount(&g, 0);
            intent.max_price = amount(&g, 2);
        }
        if intent.max_price.is_none() {
            if let Some(g) = consume(text, &MAX_RE) {
                intent.max_price = amount(&g, 0);
            }
        }
        if intent.min_price.is_none() {
            if let Some(g) = consume(text, &MIN_RE) {
                intent.min_price = amount(&g, 0);
            }
        }

        // Tiers only fill bounds that were not given explicitly
        if consume(text, &MID_RE).is_some() {
            intent.min_price = intent.min_price.or(Some(self.budget_max_price));
            intent.max_price = intent.max_price.or(Some(self.premium_min_price));
        }
        if consume(text, &BUDGET_RE).is_some() && intent.max_price.is_none() {
            intent.max_price = Some(self.budget_max_price);
        }
        if consume(text, &PREMIUM_RE).is_some() && intent.min_price.is_none() {
            intent.min_price = Some(self.premium_min_price);
        }

        if let (Some(min), Some(max)) = (intent.min_price, intent.max_price) {
            if min > max {
                intent.min_price = Some(max);
                intent.max_price = Some(min);
            }
        }
    }
}

/// Match `re` once, blank out the match, return its capture groups
fn consume(text: &mut String, re: &Regex) -> Option<Vec<Option<String>>> {
    let (range, groups) = {
        let caps = re.captures(text)?;
        let whole = caps.get(0)?;
        let groups: Vec<Option<String>> = caps
            .iter()
            .skip(1)
            .map(|g| g.map(|m| m.as_str().to_string()))
            .collect();
        // Food keyword regexes have no groups: report the matched word
        let groups = if groups.is_empty() {
            vec![Some(whole.as_str().to_string())]
        } else {
            groups
        };
        (whole.range(), groups)
    };
    let blank = " ".repeat(range.len());
    text.replace_range(range, &blank);
    Some(groups)
}

/// Amount from the (number, k-suffix) group pair starting at `index`
fn amount(groups: &[Option<String>], index: usize) -> Option<f64> {
    let number = groups.get(index)?.as_deref()?;
    let thousands = groups.get(index + 1).map(|g| g.is_some()).unwrap_or(false);
    parse_amount(number, thousands)
}

/// "1,500" / "1 500" / "1.5" (+k) -> f64 / 解析金额
pub fn parse_amount(number: &str, thousands: bool) -> Option<f64> {
    let cleaned: String = number.chars().filter(|c| !matches!(c, ',' | ' ')).collect();
    let value: f64 = cleaned.parse().ok()?;
    Some(if thousands { value * 1000.0 } else { value })
}

fn fallback_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for m in WORD_RE.find_iter(text) {
        let word = m.as_str().trim_matches(|c| c == '\'' || c == '-');
        if word.len() < 3 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(q: &str) -> SearchIntent {
        IntentParser::default().parse(q)
    }

    fn food_terms(intent: &SearchIntent) -> Vec<&str> {
        intent.foods.iter().map(|f| f.name_term.as_str()).collect()
    }

    #[test]
    fn test_max_price() {
        let intent = parse("Show me dishes under 1000 DZD");
        assert_eq!(intent.max_price, Some(1000.0));
        assert_eq!(intent.min_price, None);
        assert!(intent.fallback_terms.is_empty());

        assert_eq!(parse("less than 1,500 da").max_price, Some(1500.0));
        assert_eq!(parse("food below 1.2k").max_price, Some(1200.0));
        assert_eq!(parse("<900").max_price, Some(900.0));
    }

    #[test]
    fn test_min_price() {
        let intent = parse("Show me expensive dishes over 1500 DZD");
        // explicit bound wins over the "expensive" tier
        assert_eq!(intent.min_price, Some(1500.0));
        assert_eq!(intent.max_price, None);
    }

    #[test]
    fn test_ranges() {
        let intent = parse("pasta between 800 and 1200 dzd");
        assert_eq!((intent.min_price, intent.max_price), (Some(800.0), Some(1200.0)));
        assert_eq!(food_terms(&intent), vec!["pasta"]);

        let intent = parse("burgers 900-1100 DZD");
        assert_eq!((intent.min_price, intent.max_price), (Some(900.0), Some(1100.0)));

        // inverted bounds are swapped
        let intent = parse("from 2000 to 1000");
        assert_eq!((intent.min_price, intent.max_price), (Some(1000.0), Some(2000.0)));
    }

    #[test]
    fn test_price_tiers() {
        assert_eq!(parse("something cheap").max_price, Some(800.0));
        let mid = parse("mid-range sushi");
        assert_eq!((mid.min_price, mid.max_price), (Some(800.0), Some(1300.0)));
        assert_eq!(parse("premium seafood").min_price, Some(1300.0));

        // the tier fills only the bound left open
        let mixed = parse("mid-range pizza over 900");
        assert_eq!((mixed.min_price, mixed.max_price), (Some(900.0), Some(1300.0)));
        let mixed = parse("moderate dishes under 1000");
        assert_eq!((mixed.min_price, mixed.max_price), (Some(800.0), Some(1000.0)));

        let custom = IntentParser::new(500.0, 2000.0);
        assert_eq!(custom.parse("cheap pizza").max_price, Some(500.0));
        assert_eq!(custom.parse("fancy pizza").min_price, Some(2000.0));
    }

    #[test]
    fn test_cuisine() {
        let intent = parse("Find dishes from Italian restaurants");
        assert_eq!(intent.cuisines.len(), 1);
        assert_eq!(intent.cuisines[0].cuisine, "italian");
        assert_eq!(intent.cuisines[0].restaurant_terms, vec!["italian", "pizza", "pasta"]);
        assert!(intent.foods.is_empty());
        assert!(intent.fallback_terms.is_empty());
    }

    #[test]
    fn test_cuisine_and_price() {
        let intent = parse("Italian under 1000 DZD");
        assert_eq!(intent.cuisines[0].cuisine, "italian");
        assert_eq!(intent.max_price, Some(1000.0));
    }

    #[test]
    fn test_food_keywords_and_plurals() {
        assert_eq!(food_terms(&parse("I want to eat pizza")), vec!["pizza"]);
        assert_eq!(food_terms(&parse("any curries?")), vec!["curry"]);
        assert_eq!(food_terms(&parse("Pizzas or burgers")), vec!["pizza", "burger"]);

        let curry = &parse("curry").foods[0];
        assert_eq!(curry.category_term.as_deref(), Some("curr"));
        assert_eq!(curry.keyword, "curry");
    }

    #[test]
    fn test_known_restaurants() {
        let parser = IntentParser::default().with_restaurants(["Sushi Zen", "Pizza Palace"]);
        let intent = parser.parse("what does pizza palace serve under 1300");
        assert_eq!(intent.restaurants, vec!["pizza palace"]);
        // the restaurant name was consumed, so "pizza" is not a food keyword here
        assert!(intent.foods.is_empty());
        assert_eq!(intent.max_price, Some(1300.0));
    }

    #[test]
    fn test_restaurant_name_wins_over_cuisine_word() {
        let parser = IntentParser::default().with_restaurants(["Mediterranean Breeze", "Sushi Zen"]);
        let intent = parser.parse("dishes at Mediterranean Breeze");
        assert_eq!(intent.restaurants, vec!["mediterranean breeze"]);
        assert!(intent.cuisines.is_empty());

        // the cuisine word alone is still a cuisine
        let intent = parser.parse("mediterranean food");
        assert!(intent.restaurants.is_empty());
        assert_eq!(intent.cuisines[0].cuisine, "mediterranean");
    }

    #[test]
    fn test_fallback_terms() {
        let intent = parse("I would like a margherita please");
        assert_eq!(intent.fallback_terms, vec!["margherita"]);
    }

    #[test]
    fn test_filler_words_after_price_are_ignored() {
        let intent = parse("What's good under 1000 DZD?");
        assert_eq!(intent.max_price, Some(1000.0));
        assert!(intent.fallback_terms.is_empty());

        let intent = parse("Show me tasty dishes under 1000 DZD");
        assert!(intent.fallback_terms.is_empty());

        let intent = parse("carbonara under 1500");
        assert!(intent.fallback_terms.is_empty());
        assert_eq!(intent.max_price, Some(1500.0));
    }

    #[test]
    fn test_unrecognized_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse("show me something to eat").is_empty());
        assert!(!parse("pizza").is_empty());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,500", false), Some(1500.0));
        assert_eq!(parse_amount("1 500", false), Some(1500.0));
        assert_eq!(parse_amount("1.5", true), Some(1500.0));
        assert_eq!(parse_amount("abc", false), None);
    }
}
