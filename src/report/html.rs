use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::log::timestamp;
use crate::grading::{GradeStatus, ScoreOutcome, Statistics};
use crate::params::ExamParams;

/// Render and write the self-contained `report.html` artifact.
pub fn write_html_report(
    path: &Path,
    params: &ExamParams,
    stats: &Statistics,
    outcome: &ScoreOutcome,
) -> Result<()> {
    let html = render(params, stats, outcome);
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write HTML report at {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save HTML report at {}", path.display()))?;
    Ok(())
}

/// Build the report document: header with status badge, student details
/// card, results card, per-test table in input order, and a Chart.js line
/// chart fed the scores as a JSON array. All user-provided text goes
/// through [`escape_html`].
pub fn render(params: &ExamParams, stats: &Statistics, outcome: &ScoreOutcome) -> String {
    let passed = outcome.status == GradeStatus::Pass;
    let status_var = if passed { "var(--pass)" } else { "var(--fail)" };
    let dot_class = if passed { "dot" } else { "dot fail" };
    let bonus_pill_class = if params.has_bonus { "pill pass" } else { "pill" };
    let bonus_text = if params.has_bonus {
        format!("Yes (+{})", params.bonus_points)
    } else {
        "No".to_string()
    };
    // serializing a Vec<f64> cannot fail
    let scores_json =
        serde_json::to_string(&params.scores).unwrap_or_else(|_| "[]".to_string());

    let table_rows: String = params
        .scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            format!(
                "            <tr>\n              <td>Test {}</td>\n              <td class=\"right\"><b>{}</b></td>\n            </tr>\n",
                i + 1,
                score
            )
        })
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Student Grade Report</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>

  <style>
    :root{{
      --bg: #0b1220;
      --card: rgba(255,255,255,0.08);
      --card2: rgba(255,255,255,0.06);
      --border: rgba(255,255,255,0.12);
      --text: rgba(255,255,255,0.92);
      --muted: rgba(255,255,255,0.70);
      --muted2: rgba(255,255,255,0.55);
      --shadow: 0 18px 40px rgba(0,0,0,0.35);
      --radius: 18px;
      --pass: #22c55e;
      --fail: #ef4444;
      --accent: #60a5fa;
      --chip: rgba(96,165,250,0.18);
    }}

    *{{ box-sizing: border-box; }}
    body{{
      margin: 0;
      font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif;
      color: var(--text);
      background:
        radial-gradient(1200px 700px at 20% 10%, rgba(96,165,250,0.28), transparent 55%),
        radial-gradient(900px 600px at 90% 30%, rgba(34,197,94,0.18), transparent 55%),
        var(--bg);
      min-height: 100vh;
    }}

    .container{{ max-width: 1100px; margin: 0 auto; padding: 28px 18px 60px; }}

    header{{
      display:flex;
      align-items:flex-end;
      justify-content:space-between;
      gap: 16px;
      margin-bottom: 18px;
    }}
    .title{{ display:flex; flex-direction:column; gap: 6px; }}
    h1{{ margin:0; font-size: 28px; letter-spacing: 0.2px; }}
    .subtitle{{ color: var(--muted); font-size: 13px; }}

    .badge{{
      display:inline-flex;
      align-items:center;
      gap: 8px;
      padding: 10px 12px;
      border-radius: 999px;
      border: 1px solid var(--border);
      background: rgba(255,255,255,0.06);
      box-shadow: var(--shadow);
      white-space: nowrap;
      font-size: 13px;
      color: var(--muted);
    }}
    .dot{{
      width: 10px;
      height: 10px;
      border-radius: 999px;
      background: {status_var};
      box-shadow: 0 0 0 4px rgba(34,197,94,0.15);
    }}
    .dot.fail{{ box-shadow: 0 0 0 4px rgba(239,68,68,0.15); }}

    .grid{{ display:grid; grid-template-columns: 1.1fr 0.9fr; gap: 16px; }}
    @media (max-width: 880px){{
      .grid{{ grid-template-columns: 1fr; }}
      header{{ align-items:flex-start; flex-direction:column; }}
    }}

    .card{{
      background: linear-gradient(180deg, var(--card), var(--card2));
      border: 1px solid var(--border);
      border-radius: var(--radius);
      padding: 16px;
      box-shadow: var(--shadow);
    }}
    .card h2{{
      margin: 0 0 10px;
      font-size: 16px;
      color: rgba(255,255,255,0.88);
      font-weight: 650;
      letter-spacing: 0.2px;
    }}

    .kv{{
      display:grid;
      grid-template-columns: 140px 1fr;
      row-gap: 10px;
      column-gap: 12px;
      margin-top: 10px;
      font-size: 14px;
    }}
    .k{{ color: var(--muted2); }}
    .v{{ color: var(--text); }}

    .pill{{
      display:inline-flex;
      align-items:center;
      gap: 8px;
      padding: 6px 10px;
      border-radius: 999px;
      border: 1px solid var(--border);
      background: rgba(255,255,255,0.05);
      font-size: 12px;
      color: var(--muted);
    }}
    .pill strong{{ color: var(--text); font-weight: 650; }}
    .pill.accent{{ background: var(--chip); border-color: rgba(96,165,250,0.35); }}
    .pill.pass{{ background: rgba(34,197,94,0.16); border-color: rgba(34,197,94,0.35); }}

    .score-big{{
      display:flex;
      align-items:flex-end;
      justify-content:space-between;
      gap: 12px;
      margin-top: 6px;
    }}
    .score-big .num{{ font-size: 44px; font-weight: 750; letter-spacing: -1px; line-height: 1; }}
    .score-big .meta{{
      display:flex;
      flex-direction:column;
      gap: 8px;
      align-items:flex-end;
      text-align:right;
    }}

    .divider{{ height:1px; background: rgba(255,255,255,0.10); margin: 14px 0; }}

    table{{
      width:100%;
      border-collapse: collapse;
      overflow:hidden;
      border-radius: 12px;
      border: 1px solid rgba(255,255,255,0.10);
    }}
    thead th{{
      text-align:left;
      font-size: 12px;
      font-weight: 650;
      padding: 10px 12px;
      color: rgba(255,255,255,0.75);
      background: rgba(255,255,255,0.06);
      border-bottom: 1px solid rgba(255,255,255,0.10);
    }}
    tbody td{{
      padding: 10px 12px;
      border-bottom: 1px solid rgba(255,255,255,0.08);
      color: rgba(255,255,255,0.88);
      font-size: 13px;
    }}
    tbody tr:last-child td{{ border-bottom: none; }}

    .right{{ text-align:right; }}
    .muted{{ color: var(--muted); font-size: 12px; }}

    .chart-wrap{{ height: 240px; margin-top: 10px; }}

    footer{{
      margin-top: 16px;
      color: var(--muted2);
      font-size: 12px;
      display:flex;
      justify-content:space-between;
      gap: 10px;
      flex-wrap:wrap;
    }}
    code{{
      background: rgba(255,255,255,0.06);
      padding: 2px 6px;
      border-radius: 8px;
      border: 1px solid rgba(255,255,255,0.10);
      color: rgba(255,255,255,0.85);
    }}
  </style>
</head>

<body>
  <div class="container">
    <header>
      <div class="title">
        <h1>Student Grade Report</h1>
        <div class="subtitle">Generated: {generated}</div>
      </div>

      <div class="badge">
        <span class="{dot_class}"></span>
        <span>Status: <b style="color:{status_var}">{status}</b></span>
      </div>
    </header>

    <div class="grid">
      <div class="card">
        <h2>Student Details</h2>
        <div class="kv">
          <div class="k">Name</div><div class="v">{name}</div>
          <div class="k">Student ID</div><div class="v">{id}</div>
          <div class="k">Exam Date</div><div class="v">{date}</div>
          <div class="k">Scores</div><div class="v"><span class="pill accent"><strong>{count}</strong> tests</span></div>
        </div>

        <div class="divider"></div>

        <h2>Results</h2>
        <div class="score-big">
          <div>
            <div class="muted">Final Score</div>
            <div class="num" style="color:{status_var}">{final_score:.2}</div>
          </div>
          <div class="meta">
            <span class="pill">Average: <strong>{average:.2}</strong></span>
            <span class="pill">Threshold: <strong>{threshold}</strong></span>
            <span class="{bonus_pill_class}">Bonus: <strong>{bonus_text}</strong></span>
          </div>
        </div>

        <div class="divider"></div>

        <div class="muted">
          Min: <b style="color:var(--text)">{min}</b> &middot;
          Max: <b style="color:var(--text)">{max}</b> &middot;
          Std Dev: <b style="color:var(--text)">{std_dev:.2}</b>
        </div>
      </div>

      <div class="card">
        <h2>Chart</h2>
        <div class="muted">Score trend across tests</div>
        <div class="chart-wrap">
          <canvas id="scoresChart"></canvas>
        </div>

        <div class="divider"></div>

        <h2>Scores Table</h2>
        <table>
          <thead>
            <tr>
              <th>#</th>
              <th class="right">Score</th>
            </tr>
          </thead>
          <tbody>
{table_rows}          </tbody>
        </table>
      </div>
    </div>

    <footer>
      <div>Artifacts: <code>report.html</code> &middot; <code>run.log</code> &middot; <code>summary.json</code></div>
      <div class="muted">CI generated via Jenkins pipeline</div>
    </footer>
  </div>

  <script>
    const scores = {scores_json};
    const labels = scores.map((_, i) => "Test " + (i + 1));
    const ctx = document.getElementById("scoresChart").getContext("2d");

    new Chart(ctx, {{
      type: "line",
      data: {{
        labels,
        datasets: [{{
          label: "Scores",
          data: scores,
          tension: 0.35,
          fill: true,
          borderWidth: 2,
          pointRadius: 3
        }}]
      }},
      options: {{
        responsive: true,
        maintainAspectRatio: false,
        plugins: {{
          legend: {{ labels: {{ color: "rgba(255,255,255,0.75)" }} }}
        }},
        scales: {{
          x: {{ ticks: {{ color: "rgba(255,255,255,0.65)" }}, grid: {{ color: "rgba(255,255,255,0.06)" }} }},
          y: {{ min: 0, max: 100, ticks: {{ color: "rgba(255,255,255,0.65)" }}, grid: {{ color: "rgba(255,255,255,0.06)" }} }}
        }}
      }}
    }});
  </script>
</body>
</html>
"#,
        generated = timestamp(),
        status = outcome.status,
        name = escape_html(&params.student_name),
        id = escape_html(&params.student_id),
        date = params.exam_date.format("%Y-%m-%d"),
        count = stats.count,
        final_score = outcome.final_score,
        average = stats.average,
        threshold = params.pass_threshold,
        min = stats.min,
        max = stats.max,
        std_dev = stats.std_dev,
    )
}

/// Escape text for interpolation into HTML content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
