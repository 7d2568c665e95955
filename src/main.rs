use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tokio::time::{sleep, Duration};

use salesboard::config::Config;
use salesboard::dashboard::{AnalyticsDashboard, HomeDashboard, ReportsDashboard, TeamsDashboard};
use salesboard::logging::{log, obj, v_num, v_str, Domain, Level};
use salesboard::model::TeamForm;
use salesboard::projection::Selectors;
use salesboard::query::TeamSortKey;
use salesboard::reports::ReportKind;
use salesboard::seed;

fn emit(context: &str, payload: serde_json::Value) {
    println!("{}", json!({ "context": context, "view": payload }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut rng = cfg.rng();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("latency_ms", v_num(cfg.refresh_latency_ms as f64)),
            ("auto_refresh_secs", v_num(cfg.auto_refresh_secs as f64)),
            ("region", v_str(cfg.default_region.as_str())),
            ("product", v_str(cfg.default_product.as_str())),
            ("ticks", v_num(cfg.demo_ticks as f64)),
        ]),
    );

    let mut home = HomeDashboard::new(seed::home_snapshot(), Selectors::new(cfg.default_region, cfg.default_product));
    let mut reports = ReportsDashboard::new(seed::reports_dataset(Utc::now().date_naive(), &mut rng));
    let mut teams = TeamsDashboard::new(seed::teams());
    let analytics = AnalyticsDashboard::seeded();

    emit("home", json!({ "panel": home.revenue_panel(), "kpis": home.kpis() }));
    for kind in ReportKind::ALL {
        reports.select_report(kind);
        emit("reports", serde_json::to_value(reports.view())?);
    }
    emit("analytics", serde_json::to_value(analytics.overview())?);

    let created = teams.submit_create(
        TeamForm {
            name: "Channel Partners".to_string(),
            description: "Reseller and referral relationships".to_string(),
            leader: "Priya Raman".to_string(),
            members: 4,
        },
        Utc::now(),
        &mut rng,
    )?;
    teams.sort_by(TeamSortKey::Performance);
    teams.sort_by(TeamSortKey::Performance);
    emit("teams", json!({ "created": created.id, "visible": teams.visible() }));

    let latency = Duration::from_millis(cfg.refresh_latency_ms);
    for tick in 0..cfg.demo_ticks {
        if tick > 0 && cfg.auto_refresh_enabled() {
            sleep(Duration::from_secs(cfg.auto_refresh_secs)).await;
        }
        home.data_mut().refresh_with_latency(latency, &mut rng).await?;
        reports.data_mut().refresh_with_latency(latency, &mut rng).await?;
        let panel = home.revenue_panel();
        log(
            Level::Info,
            Domain::System,
            "tick",
            obj(&[
                ("tick", v_num(tick as f64)),
                ("total_actual", v_num(panel.summary.total_actual)),
                ("percent_of_target", v_num(panel.summary.percent_of_target)),
            ]),
        );
        emit("home", json!({ "panel": panel, "kpis": home.kpis() }));
    }

    log(Level::Info, Domain::System, "shutdown", obj(&[("teams", v_num(teams.store().len() as f64))]));
    Ok(())
}
