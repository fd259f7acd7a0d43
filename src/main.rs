use chrono::{NaiveDate, Utc};

use daybook_lib::calendar::clock;
use daybook_lib::commands;
use daybook_lib::config::Config;
use daybook_lib::state::AppContext;

fn print_usage() {
    eprintln!("Usage: daybook <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  day [YYYY-MM-DD]     day schedule (default: today)");
    eprintln!("  month [YYYY-MM]      month grid (default: current month)");
    eprintln!("  time                 work entries and overtime, last 7 days");
    eprintln!("  vacation             vacation ledger and balance");
    eprintln!("  journal <YYYY-MM-DD> journal entry for a date");
    eprintln!();
    eprintln!("Credentials come from DAYBOOK_EMAIL and DAYBOOK_PASSWORD.");
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(message) = run().await {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return Err("missing command".to_string());
    };

    let config = Config::load().map_err(|e| e.to_string())?;
    let email =
        std::env::var("DAYBOOK_EMAIL").map_err(|_| "DAYBOOK_EMAIL not set".to_string())?;
    let password =
        std::env::var("DAYBOOK_PASSWORD").map_err(|_| "DAYBOOK_PASSWORD not set".to_string())?;

    let ctx = AppContext::sign_in(&config, &email, &password)
        .await
        .map_err(|e| e.to_string())?;
    let today = Utc::now().with_timezone(&ctx.tz).date_naive();

    match command.as_str() {
        "day" => {
            let date = match args.get(2) {
                Some(arg) => parse_date(arg)?,
                None => today,
            };
            let data = commands::load_day(&ctx, date).await?;
            render_day(&data);
        }
        "month" => {
            let (year, month) = match args.get(2) {
                Some(arg) => parse_month(arg)?,
                None => {
                    use chrono::Datelike;
                    (today.year(), today.month())
                }
            };
            let data = commands::load_month(&ctx, year, month).await?;
            render_month(&data);
        }
        "time" => {
            let from = today - chrono::Duration::days(6);
            let overview = commands::load_time_overview(&ctx, from, today).await?;
            render_time(&overview);
        }
        "vacation" => {
            let overview = commands::load_vacation(&ctx).await?;
            render_vacation(&overview);
        }
        "journal" => {
            let arg = args
                .get(2)
                .ok_or_else(|| "journal requires a date".to_string())?;
            let date = parse_date(arg)?;
            match commands::load_journal(&ctx, date).await? {
                Some(entry) => println!("{}", entry.content),
                None => println!("(no entry for {date})"),
            }
        }
        _ => {
            print_usage();
            return Err(format!("unknown command: {command}"));
        }
    }

    ctx.sign_out();
    Ok(())
}

fn parse_date(arg: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(arg, "%Y-%m-%d").map_err(|_| format!("invalid date: {arg}"))
}

fn parse_month(arg: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("invalid month: {arg}");
    let (year, month) = arg.split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn render_day(data: &commands::DayData) {
    println!("{}", clock::date_key(data.date));
    if let Some(band) = &data.schedule.work_band {
        println!("  work band: {} / {}", band.top_px(), band.height_px());
    }
    if !data.schedule.overdue.is_empty() {
        println!("  overdue:");
        for placed in &data.schedule.overdue {
            println!("    ! {}", placed.item.title);
        }
    }
    for placed in &data.schedule.timed {
        let label = placed.item.time_label.as_deref().unwrap_or("--:--");
        println!(
            "  {label}  {}  ({} / {})",
            placed.item.title,
            placed.position.top_px(),
            placed.position.height_px()
        );
    }
    if !data.schedule.off_grid.is_empty() {
        println!("  outside hours:");
        for item in &data.schedule.off_grid {
            println!("    - {}", item.title);
        }
    }
}

fn render_month(data: &commands::MonthData) {
    println!("{}-{:02}", data.year, data.month);
    for cell in &data.cells {
        let total =
            cell.meetings.len() + cell.actions.len() + cell.work_entries.len() + cell.vacation.len();
        if total == 0 {
            continue;
        }
        let marker = if cell.in_month { " " } else { "." };
        println!(
            "{marker} {}  meetings:{} actions:{} work:{} vacation:{}",
            cell.date,
            cell.meetings.len(),
            cell.actions.len(),
            cell.work_entries.len(),
            cell.vacation.len()
        );
    }
}

fn render_time(overview: &commands::TimeOverview) {
    for day in &overview.days {
        println!(
            "  {}  {:.2}h worked, {:+.2}h overtime",
            day.date, day.worked_hours, day.overtime_hours
        );
    }
    match overview.balance_minutes {
        Some(minutes) => println!("  balance: {minutes:+.0} minutes"),
        None => println!("  balance: unavailable"),
    }
}

fn render_vacation(overview: &commands::VacationOverview) {
    for tx in &overview.transactions {
        println!("  {}  {:?}  {:+.1}h", tx.date, tx.kind, tx.hours);
    }
    println!("  balance: {:.1} hours", overview.balance_hours);
}
