use crate::{
    ranking::{AggregatedResult, Ranking},
    report::Style,
};

pub(crate) fn medal(position: usize) -> Option<&'static str> {
    match position {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

pub(crate) fn ordinal(position: usize) -> String {
    let suffix = match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", position, suffix)
}

fn status(result: &AggregatedResult, style: &Style) -> String {
    if result.goal.exceeded() {
        "✅ GOAL ATTAINED! Exceeded the goal!".to_string()
    } else if result.goal.attained {
        "✅ GOAL ATTAINED!".to_string()
    } else {
        format!(
            "⏳ {} missing to reach the goal",
            style.money(result.goal.shortfall)
        )
    }
}

/// Plain text ranking, one block per salesperson.
pub fn ranking(ranking: &Ranking, style: &Style) -> String {
    let period = &ranking.period;
    let mut text = String::new();
    text += &format!(
        "🏆 SALES PERFORMANCE RANKING - {}\n",
        period.to_string().to_uppercase()
    );
    text += &format!("Ordered by value of sales installed in {}\n\n", period);

    for (index, result) in ranking.entries.iter().enumerate() {
        let position = index + 1;
        text += &format!(
            "{} {} PLACE - {}\n",
            medal(position).unwrap_or("📍"),
            ordinal(position),
            result.key.to_uppercase()
        );
        text += &format!("   Sales installed in {}: {}\n", period, result.installed_count);
        text += &format!("   Installed value: {}\n", style.money(result.total_installed_value));
        text += &format!(
            "   Goal: {} ({}%)\n",
            style.money(result.goal.goal),
            style.number(result.goal.percent_uncapped, 1)
        );
        text += &format!("   {}\n\n", status(result, style));
    }
    text
}

/// Detailed view of one salesperson, including every installed sale.
pub fn detail(result: &AggregatedResult, style: &Style) -> String {
    let mut text = String::new();
    text += &format!("📋 DETAILS - {}\n", result.key.to_uppercase());
    text += &format!("├─ Name: {}\n", result.display_name);
    text += &format!("├─ Registered sales: {}\n", result.registered_count);
    text += &format!("├─ Installed sales: {}\n", result.installed_count);
    text += &format!("├─ Total value: {}\n", style.money(result.total_installed_value));
    text += &format!("├─ Goal: {}\n", style.money(result.goal.goal));
    text += &format!("├─ Progress: {}%\n", style.number(result.goal.percent_uncapped, 1));
    text += &format!("└─ Status: {}\n", status(result, style));

    if !result.installed.is_empty() {
        text.push_str("\n💰 INSTALLED SALES:\n");
        for (i, sale) in result.installed.iter().enumerate() {
            text += &format!(
                "{}. {} - {} ({}, {})\n",
                i + 1,
                sale.customer,
                style.money(sale.value),
                sale.activation_date,
                sale.plan
            );
        }
    }
    text
}

/// One line per salesperson plus goal statistics.
pub fn summary(ranking: &Ranking, style: &Style) -> String {
    let mut text = String::new();
    text += &format!("🎯 GOAL SUMMARY - {}\n", ranking.period);
    text.push_str(&"═".repeat(70));
    text.push('\n');
    for result in &ranking.entries {
        let status = if result.goal.exceeded() {
            "🟣 EXCEEDED"
        } else if result.goal.attained {
            "🟢 ATTAINED"
        } else {
            "🔴 PENDING"
        };
        text += &format!(
            "{:<10} | {:>9}/{:>9} | {:>5}% | {}\n",
            result.key,
            style.thousands(result.total_installed_value, 1),
            style.thousands(result.goal.goal, 1),
            style.number(result.goal.percent_uncapped, 1),
            status
        );
    }

    let stats = ranking.statistics();
    text.push_str(&"─".repeat(70));
    text.push_str("\n📊 STATISTICS:\n");
    text += &format!(
        "   Attained the goal: {}/{} ({}%)\n",
        stats.attained,
        stats.salespeople,
        style.number(stats.attained_percent(), 1)
    );
    text += &format!(
        "   Exceeded the goal: {}/{} ({}%)\n",
        stats.exceeded,
        stats.salespeople,
        style.number(stats.exceeded_percent(), 1)
    );
    text
}
