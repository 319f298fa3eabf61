use crate::{
    goal::GoalTier,
    ranking::{AggregatedResult, Ranking},
    report::{text::medal, Style},
};

const STYLESHEET: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: linear-gradient(135deg, #1e3c72 0%, #2a5298 50%, #3b73c7 100%);
    min-height: 100vh;
    padding: 20px;
    display: flex;
    justify-content: center;
    align-items: center;
}
.container {
    background: rgba(66, 100, 158, 0.9);
    border-radius: 20px;
    padding: 30px;
    max-width: 650px;
    width: 100%;
    box-shadow: 0 25px 80px rgba(0, 0, 0, 0.4);
}
.header { text-align: center; margin-bottom: 25px; color: white; }
.logo { max-width: 250px; margin-bottom: 15px; }
.title { font-size: 24px; font-weight: 700; text-transform: uppercase; letter-spacing: 1.5px; }
.subtitle { font-size: 16px; opacity: 0.9; }
.ranking { display: flex; flex-direction: column; gap: 14px; }
.card {
    position: relative;
    border-radius: 20px;
    padding: 18px;
    border: 1px solid rgba(255, 255, 255, 0.3);
    overflow: hidden;
    --fill: rgba(46, 204, 113, 0.3);
}
.card::before {
    content: '';
    position: absolute;
    inset: 0;
    background: linear-gradient(90deg, var(--fill) 0%, var(--fill) var(--progress),
        rgba(255, 255, 255, 0.15) var(--progress), rgba(255, 255, 255, 0.15) 100%);
    z-index: 1;
}
.card > * { position: relative; z-index: 2; }
.card.goal-low { --fill: rgba(110, 95, 245, 0.2); }
.card.goal-medium { --fill: rgba(34, 217, 230, 0.3); }
.card.goal-high { --fill: rgba(155, 89, 182, 0.3); }
.card.goal-exceeded { --fill: rgba(46, 204, 113, 0.4); }
.card-header { display: flex; align-items: center; justify-content: space-between; margin-bottom: 12px; }
.identity { display: flex; align-items: center; gap: 12px; }
.position {
    display: flex; align-items: center; justify-content: center;
    width: 35px; height: 35px; border-radius: 50%;
    color: white; font-weight: 700; background: #3498db;
}
.medal { font-size: 20px; }
.name { font-size: 25px; font-weight: 600; color: rgba(255, 255, 255, 0.95); }
.value { font-size: 20px; font-weight: 700; padding: 6px 14px; border-radius: 10px; color: white; }
.metrics { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
.metric { background: rgba(255, 255, 255, 0.1); border-radius: 14px; padding: 14px; text-align: center; }
.metric-label { font-size: 11px; color: rgba(255, 255, 255, 0.8); text-transform: uppercase; letter-spacing: 1px; }
.metric-value { font-size: 22px; font-weight: 700; color: rgba(255, 255, 255, 0.95); }
.first .position { background: linear-gradient(135deg, #f1c40f, #f39c12); }
.second .position { background: linear-gradient(135deg, #95a5a6, #7f8c8d); }
.third .position { background: linear-gradient(135deg, #cd7f32, #b8651b); }
.first .value { color: #ffd700; background: rgba(255, 215, 0, 0.15); }
.second .value { color: #d1d1d1; background: rgba(160, 160, 160, 0.15); }
.third .value { color: #e09a54; background: rgba(205, 127, 50, 0.15); }
@media (max-width: 768px) {
    .card-header { flex-direction: column; align-items: flex-start; gap: 10px; }
    .metrics { grid-template-columns: 1fr; }
}
"#;

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn position_class(position: usize) -> &'static str {
    match position {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        5 => "fifth",
        _ => "other",
    }
}

fn tier_class(tier: GoalTier) -> &'static str {
    match tier {
        GoalTier::Low => "goal-low",
        GoalTier::Medium => "goal-medium",
        GoalTier::High => "goal-high",
        GoalTier::Exceeded => "goal-exceeded",
    }
}

fn card(position: usize, result: &AggregatedResult, ranking: &Ranking, style: &Style) -> String {
    let goal = &result.goal;
    format!(
        r#"
            <div class="card {position_class} {tier_class}" style="--progress: {progress}%">
                <div class="card-header">
                    <div class="identity">
                        <span class="position">{position}</span>
                        <span class="medal">{medal}</span>
                        <span class="name">{name}</span>
                    </div>
                    <div class="value">{value}</div>
                </div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">Installed in {month}</div>
                        <div class="metric-value">{installed}</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Goal | {goal}</div>
                        <div class="metric-value">{percent}%</div>
                    </div>
                </div>
            </div>"#,
        position_class = position_class(position),
        tier_class = tier_class(goal.tier()),
        progress = goal.percent_capped.round_dp(2).normalize(),
        position = position,
        medal = medal(position).unwrap_or(""),
        name = escape(&result.key),
        value = escape(&style.money(result.total_installed_value)),
        month = ranking.period.month_name(),
        installed = result.installed_count,
        goal = escape(&style.thousands(goal.goal, 0)),
        percent = style.number(goal.percent_uncapped, 0),
    )
}

/// Self-contained HTML page with one card per salesperson.
pub fn ranking(ranking: &Ranking, style: &Style) -> String {
    let period = &ranking.period;
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sales Ranking - {period}</title>
    <style>{STYLESHEET}</style>
</head>
<body>
    <div class="container">
        <div class="header">"#,
        period = period,
        STYLESHEET = STYLESHEET,
    );
    if let Some(logo) = &style.logo {
        html += &format!(
            r#"
            <img src="{}" class="logo" alt="Logo">"#,
            escape(logo)
        );
    }
    html += &format!(
        r#"
            <h1 class="title">Sales Ranking</h1>
            <p class="subtitle">{period} - Performance by Salesperson</p>
        </div>
        <div class="ranking">"#,
        period = period,
    );

    for (index, result) in ranking.entries.iter().enumerate() {
        html += &card(index + 1, result, ranking, style);
    }

    html.push_str(
        r#"
        </div>
    </div>
</body>
</html>
"#,
    );
    html
}
