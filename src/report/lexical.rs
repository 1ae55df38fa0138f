use serde_json::Value;

use crate::error::ReportError;

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 4] = [
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// Two-decimal rendering with trailing zeros and point removed: `30.000000000000004 -> "30"`,
/// `2.5 -> "2.5"`.
pub fn num_to_display(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let mut out = format!("{:.2}", x);
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

/// Display form of a sidecar value; numbers go through [`num_to_display`].
pub fn value_to_display(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(num_to_display)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `A`, `A and B`, `A, B, and C`.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [a, b] => format!("{} and {}", a.as_ref(), b.as_ref()),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

pub fn to_cardinal_words(n: i64) -> Result<String, ReportError> {
    if n < 0 {
        return Err(ReportError::Format {
            value: n,
            form: "cardinal",
        });
    }
    Ok(cardinal(n as u64))
}

pub fn to_ordinal_words(n: i64) -> Result<String, ReportError> {
    if n <= 0 {
        return Err(ReportError::Format {
            value: n,
            form: "ordinal",
        });
    }
    let words = cardinal(n as u64);
    let split = words.rfind(|c: char| c == ' ' || c == '-').map(|i| i + 1).unwrap_or(0);
    let (head, last) = words.split_at(split);
    Ok(format!("{head}{}", ordinal_of(last)))
}

/// Sentence-initial count with noun agreement: `One run`, `Three runs`.
pub fn count_phrase(n: usize, singular: &str, plural: &str) -> Result<String, ReportError> {
    let words = to_cardinal_words(n as i64)?;
    let noun = if n == 1 { singular } else { plural };
    Ok(format!("{} {noun}", title_case(&words)))
}

/// Upper-cases the first letter of every alphabetic run: `twenty-one -> Twenty-One`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() && !prev_alpha {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

/// Collapses newlines and repeated whitespace; strips both ends.
pub fn normalize_paragraph(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `300 -> "5:00"`.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// English words in `num2words` form: scale groups are separated by commas and
/// a trailing part below one hundred is joined with "and"
/// (`1100 -> "one thousand, one hundred"`, `1005 -> "one thousand and five"`).
fn cardinal(n: u64) -> String {
    if n < 1000 {
        return below_thousand(n);
    }
    let mut out = String::new();
    let mut rem = n;
    for (scale, name) in SCALES {
        if rem >= scale {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&format!("{} {name}", cardinal(rem / scale)));
            rem %= scale;
        }
    }
    if rem > 0 {
        out.push_str(if rem < 100 { " and " } else { ", " });
        out.push_str(&below_thousand(rem));
    }
    out
}

fn below_thousand(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred and {}", ONES[h as usize], below_hundred(r)),
    }
}

fn below_hundred(n: u64) -> String {
    let n = n as usize;
    if n < 20 {
        return ONES[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        unit => format!("{}-{}", TENS[n / 10], ONES[unit]),
    }
}

fn ordinal_of(word: &str) -> String {
    match word {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{w}th"),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/lexical.rs"]
mod tests;
