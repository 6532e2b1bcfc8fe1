//! Prints the task list and the current month of a dashboard.
//!
//! Set `TIMELINE_URL` (and optionally `TIMELINE_USERNAME`, `TIMELINE_PASSWORD`, `TIMELINE_ADMIN`) to talk to a real server.
//! Otherwise, an in-memory backend with sample data is used.
//! Set `RUST_LOG` to see what is going on under the hood.

use chrono::NaiveDate;

use timeline_board::calendar::{CalendarManager, DayCell, WEEKDAY_NAMES};
use timeline_board::client::Client;
use timeline_board::config::Settings;
use timeline_board::filter::Role;
use timeline_board::mock_backend::MockBackend;
use timeline_board::notification::LogNotifier;
use timeline_board::task_list::{TaskListManager, TaskListView};
use timeline_board::traits::TaskBackend;

#[tokio::main]
async fn main() {
    env_logger::init();

    let today = chrono::Local::now().date_naive();
    match Settings::from_env() {
        Err(err) => {
            log::error!("Invalid settings: {}", err);
            std::process::exit(1);
        },
        Ok(Some(settings)) => {
            let role = settings.role;
            match Client::from_resource(settings.resource) {
                Ok(client) => {
                    println!("Using the server at {}", client.resource().url());
                    show(client, role, today).await
                },
                Err(err) => {
                    log::error!("Unable to create an HTTP client: {}", err);
                    std::process::exit(1);
                },
            }
        },
        Ok(None) => {
            println!("TIMELINE_URL is not set, using sample data");
            show(MockBackend::sample(today), Role::Member, today).await;
        },
    }
}

async fn show<B: TaskBackend>(backend: B, role: Role, today: NaiveDate) {
    let mut tasks = TaskListManager::new(backend, LogNotifier, role);
    if tasks.load_tasks().await.is_ok() {
        print_tasks(&tasks.view(today));
    }

    // The task list does not need its backend anymore
    let backend = tasks.into_backend();
    let mut calendar = CalendarManager::new(backend, LogNotifier, role, today);
    if calendar.refresh().await.is_ok() {
        print_grid(&calendar, today);
    }
}

fn print_tasks(view: &TaskListView) {
    match view {
        TaskListView::Unavailable => println!("Tasks are unavailable"),
        TaskListView::NoTasks => println!("No tasks yet"),
        TaskListView::NoResults => println!("No task matches the filters"),
        TaskListView::Page(page) => {
            println!("{} task(s), page {}", page.total, page.page);
            for row in &page.rows {
                println!("  #{:<4} {:<30} {:<14} {:<20} {:<7} {}",
                    row.id, row.title, row.due_label, row.assignee, row.priority_label, row.status_label);
            }
        },
    }
    println!();
}

fn print_grid<B: TaskBackend>(calendar: &CalendarManager<B, LogNotifier>, today: NaiveDate) {
    let grid = calendar.grid(today);
    println!("{}", grid.label());
    println!("{}", WEEKDAY_NAMES.iter().map(|name| format!("{:>5}", name)).collect::<String>());
    for week in grid.weeks() {
        let line: String = week.iter()
            .map(|cell| match cell {
                DayCell::Filler { .. } => format!("{:>5}", "."),
                DayCell::Day(day) => {
                    let marker = if day.is_today { "*" } else if day.items.is_empty() { " " } else { "+" };
                    format!("{:>4}{}", cell.day_number(), marker)
                },
            })
            .collect();
        println!("{}", line);
    }

    for cell in grid.cells() {
        if let DayCell::Day(day) = cell {
            for item in &day.items {
                println!("  {}  {} [{}]", day.date, item.title(), item.tag());
            }
        }
    }
}
