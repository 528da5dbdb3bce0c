/// Format a number with `,` thousands separators and fixed decimals
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_currency(value: f64, decimals: usize) -> String {
    let amount = format_thousands(value, decimals);
    match amount.strip_prefix('-') {
        Some(positive) => format!("-${}", positive),
        None => format!("${}", amount),
    }
}

/// `+12.3%` style percentage
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}
