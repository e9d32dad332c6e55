use chrono::NaiveDate;
use clap::Subcommand;
use nexo_core::{LocalStore, Task, TaskStatus};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task with a due date
    Add {
        title: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: NaiveDate,
    },
    /// List all tasks
    List,
    /// Mark a task as done
    Done { id: Uuid },
    /// Delete a task
    Remove { id: Uuid },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open()?;
    let mut data = store.load()?;

    match action {
        TaskAction::Add { title, due } => {
            let task = Task::new(title, due);
            println!("{}", serde_json::to_string_pretty(&task)?);
            data.tasks.push(task);
        }
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&data.tasks)?);
            return Ok(());
        }
        TaskAction::Done { id } => {
            if let Some(task) = data.tasks.iter_mut().find(|t| t.id == id) {
                task.status = TaskStatus::Done;
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                println!("{{\"type\": \"not_found\", \"id\": \"{id}\"}}");
            }
        }
        TaskAction::Remove { id } => {
            let before = data.tasks.len();
            data.tasks.retain(|t| t.id != id);
            if data.tasks.len() != before {
                println!("{{\"type\": \"task_removed\", \"id\": \"{id}\"}}");
            } else {
                println!("{{\"type\": \"not_found\", \"id\": \"{id}\"}}");
            }
        }
    }

    store.save(&data)?;
    Ok(())
}
