//! CLI module for the content-hub application
//!
//! This module handles the command-line interface for interacting with the
//! content store. It is view glue: every mutation goes through the store
//! engine, and every listing renders the derived view.
use std::fs::read_to_string;

use crate::{
    compute_view, parse_tags, AddCommands, Commands, CommonItemArgs, Config, ContentItem,
    ContentStore, GroupCommands, HubError, ItemPayload, ItemType, NewItem, Result, SortOrder,
    Task, TargetType,
};

/// CLI Application handler - processes CLI commands and interfaces with the
/// content store
pub struct App {
    /// The content store engine
    store: ContentStore,

    /// Application configuration
    config: Config,
}

impl App {
    /// Create a new CLI application with the given store and config
    pub fn new(store: ContentStore, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Group { command } => self.handle_group(command)?,

            Commands::Add { item } => self.handle_add(item)?,

            Commands::List {
                group,
                item_type,
                search,
                sort,
                json,
            } => self.handle_list(group, item_type, search, sort, json)?,

            Commands::View { id, json } => self.handle_view(&id, json)?,

            Commands::Edit {
                id,
                title,
                content,
                url,
                tags,
            } => self.handle_edit(&id, title, content, url, tags)?,

            Commands::Toggle { id, task_id } => self.handle_toggle(&id, &task_id)?,

            Commands::Delete { id, force: _ } => self.store.delete_item(&id),

            Commands::Move { id, group } => self.store.move_item(&id, &group),

            Commands::Duplicate { id } => {
                self.store.duplicate_item(&id);
            }

            Commands::Export { output } => {
                let dir = output.unwrap_or_else(|| self.config.export_dir.clone());
                self.store.export_data(&dir);
            }

            Commands::Import { file } => self.store.import_file(&file),
        }

        Ok(())
    }

    fn handle_group(&mut self, command: GroupCommands) -> Result<()> {
        match command {
            GroupCommands::Add { name, icon } => {
                match self.store.add_group(&name, icon.as_deref()) {
                    Some(group) => println!("Group created with ID: {}", group.id),
                    None => println!("Group name cannot be empty."),
                }
            }

            GroupCommands::Update { id, name, icon } => {
                self.require_group(&id)?;
                self.store.update_group(&id, &name, icon.as_deref());
            }

            // The confirmation gate was chosen at startup, so --force is
            // already accounted for here.
            GroupCommands::Delete { id, force: _ } => {
                self.require_group(&id)?;
                self.store.delete_group(&id);
            }

            GroupCommands::List { json } => self.display_groups(json)?,
        }

        Ok(())
    }

    /// The engine treats unknown group ids as silent no-ops; the CLI
    /// reports them instead of printing nothing.
    fn require_group(&self, id: &str) -> Result<()> {
        if self.store.data().groups.iter().any(|g| g.id == id) {
            Ok(())
        } else {
            Err(HubError::GroupNotFound { id: id.to_string() })
        }
    }

    fn display_groups(&self, json: bool) -> Result<()> {
        let data = self.store.data();

        if json {
            println!("{}", serde_json::to_string_pretty(&data.groups)?);
            return Ok(());
        }

        for group in &data.groups {
            let item_count = data.items.iter().filter(|i| i.group_id == group.id).count();
            let marker = if self.store.active_group_id() == Some(group.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                "{} {} {} [{}] - {} item{}, opened {} time{}",
                marker,
                group.id,
                console::style(&group.name).bold(),
                group.icon,
                item_count,
                if item_count == 1 { "" } else { "s" },
                group.access_count,
                if group.access_count == 1 { "" } else { "s" },
            );
        }

        Ok(())
    }

    fn handle_add(&mut self, item: AddCommands) -> Result<()> {
        let created = match item {
            AddCommands::Note {
                title,
                content,
                file,
                common,
            } => {
                let content = match (content, file) {
                    (Some(c), _) => c,
                    (_, Some(path)) => {
                        if !path.exists() {
                            return Err(HubError::ApplicationError {
                                message: format!("File not found: {}", path.display()),
                            });
                        }
                        read_to_string(path)?
                    }
                    (None, None) => String::new(),
                };
                self.add_item(title, ItemPayload::Note { content }, common)?
            }

            AddCommands::Link { title, url, common } => {
                self.add_item(title, ItemPayload::Link { url }, common)?
            }

            AddCommands::Image { title, url, common } => {
                self.add_item(title, ItemPayload::Image { url }, common)?
            }

            AddCommands::Todo {
                title,
                tasks,
                common,
            } => {
                let tasks = tasks
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| Task {
                        id: (i + 1).to_string(),
                        text,
                        completed: false,
                    })
                    .collect();
                self.add_item(title, ItemPayload::Todo { tasks }, common)?
            }
        };

        match created {
            Some(item) => println!("Item created with ID: {}", item.id),
            None => println!("Item was not created. Check the title and target group."),
        }

        Ok(())
    }

    fn add_item(
        &mut self,
        title: String,
        payload: ItemPayload,
        common: CommonItemArgs,
    ) -> Result<Option<ContentItem>> {
        let group_id = match common.group {
            Some(group) => group,
            None => self
                .store
                .active_group_id()
                .map(str::to_string)
                .ok_or_else(|| HubError::ApplicationError {
                    message: "no group available; create one with `group add`".to_string(),
                })?,
        };

        Ok(self.store.add_item(NewItem {
            group_id,
            title,
            tags: parse_tags(common.tags),
            icon: common.icon,
            aspect: common.aspect,
            payload,
        }))
    }

    /// List items according to the provided filters and options
    fn handle_list(
        &mut self,
        group: Option<String>,
        item_type: Option<ItemType>,
        search: Option<String>,
        sort: SortOrder,
        json: bool,
    ) -> Result<()> {
        // Switching the browsed group counts as an access.
        if let Some(group) = group {
            self.store.set_active_group(Some(group));
        }

        let search = search.unwrap_or_default();
        let view = compute_view(
            &self.store.data().items,
            self.store.active_group_id(),
            &search,
            item_type,
            sort,
        );

        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        if view.is_empty() {
            println!("No items found matching the criteria.");
            return Ok(());
        }

        for (i, item) in view.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(50));
            }
            self.display_item_brief(item);
        }

        println!(
            "\nFound {} item{}",
            view.len(),
            if view.len() == 1 { "" } else { "s" }
        );

        Ok(())
    }

    fn display_item_brief(&self, item: &ContentItem) {
        let created_at = item.created_at.format("%Y-%m-%d %H:%M");
        println!(
            "ID: {} | {:?} | Created: {}",
            item.id,
            item.item_type(),
            created_at
        );
        println!("Title: {}", console::style(&item.title).bold());

        if !item.tags.is_empty() {
            let tags = item
                .tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ");
            println!("Tags: {}", console::style(tags).cyan());
        }

        let summary = content_summary(item);
        if !summary.is_empty() {
            println!("{}", summary);
        }
    }

    fn handle_view(&mut self, id: &str, json: bool) -> Result<()> {
        if !self.store.data().items.iter().any(|i| i.id == id) {
            return Err(HubError::ItemNotFound { id: id.to_string() });
        }

        // Opening an item is the one place an item access is recorded.
        self.store.log_access(id, TargetType::Item);

        let item = self
            .store
            .data()
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| HubError::ItemNotFound { id: id.to_string() })?;

        if json {
            println!("{}", serde_json::to_string_pretty(&item)?);
            return Ok(());
        }

        println!("ID:      {}", item.id);
        println!("Title:   {}", console::style(&item.title).bold());
        println!("Group:   {}", item.group_id);
        println!("Created: {}", item.created_at.format("%Y-%m-%d %H:%M:%S"));
        if !item.tags.is_empty() {
            println!("Tags:    {}", item.tags.join(", "));
        }
        println!("Opened:  {} time(s)", item.access_count);

        match &item.payload {
            ItemPayload::Note { content } => {
                if !content.is_empty() {
                    println!("\n{}", content);
                }
            }
            ItemPayload::Link { url } | ItemPayload::Image { url } => {
                println!("URL: {}", url);
            }
            ItemPayload::Todo { tasks } => {
                println!();
                for task in tasks {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{}] {} ({})", mark, task.text, task.id);
                }
            }
        }

        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        url: Option<String>,
        tags: Option<String>,
    ) -> Result<()> {
        let mut item = self
            .store
            .data()
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| HubError::ItemNotFound { id: id.to_string() })?;

        if let Some(new_title) = title {
            item.title = new_title;
        }

        if let Some(new_content) = content {
            match &mut item.payload {
                ItemPayload::Note { content } => *content = new_content,
                _ => {
                    return Err(HubError::ApplicationError {
                        message: "only note items have content".to_string(),
                    })
                }
            }
        }

        if let Some(new_url) = url {
            match &mut item.payload {
                ItemPayload::Link { url } | ItemPayload::Image { url } => *url = new_url,
                _ => {
                    return Err(HubError::ApplicationError {
                        message: "only link and image items have a URL".to_string(),
                    })
                }
            }
        }

        if tags.is_some() {
            item.tags = parse_tags(tags);
        }

        // Full replace-by-id; the engine has no partial-merge path.
        self.store.update_item(item);
        Ok(())
    }

    fn handle_toggle(&mut self, id: &str, task_id: &str) -> Result<()> {
        let mut item = self
            .store
            .data()
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| HubError::ItemNotFound { id: id.to_string() })?;

        match &mut item.payload {
            ItemPayload::Todo { tasks } => {
                let task = tasks.iter_mut().find(|t| t.id == task_id).ok_or_else(|| {
                    HubError::ApplicationError {
                        message: format!("no task with id {} in item {}", task_id, id),
                    }
                })?;
                task.completed = !task.completed;
            }
            _ => {
                return Err(HubError::ApplicationError {
                    message: format!("item {} is not a todo list", id),
                })
            }
        }

        self.store.update_item(item);
        Ok(())
    }
}

/// One-line summary of an item's payload for list output.
fn content_summary(item: &ContentItem) -> String {
    match &item.payload {
        ItemPayload::Note { content } => content_preview(content, 100),
        ItemPayload::Link { url } | ItemPayload::Image { url } => url.clone(),
        ItemPayload::Todo { tasks } => {
            let completed = tasks.iter().filter(|t| t.completed).count();
            format!("{} of {} completed", completed, tasks.len())
        }
    }
}

/// Generate a content preview for displaying brief notes
fn content_preview(content: &str, max_len: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AutoConfirm, DataStore, LogNotifier, DATA_FILE_NAME};
    use std::path::Path;

    fn app_in(dir: &Path) -> App {
        let store = ContentStore::open(
            DataStore::with_file(dir.join(DATA_FILE_NAME)),
            Box::new(LogNotifier),
            Box::new(AutoConfirm),
        );
        let config = Config {
            data_dir: dir.to_path_buf(),
            export_dir: dir.to_path_buf(),
        };
        App::new(store, config)
    }

    #[test]
    fn updating_an_unknown_group_reports_group_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let err = app
            .run(Commands::Group {
                command: GroupCommands::Update {
                    id: "999".to_string(),
                    name: "Renamed".to_string(),
                    icon: None,
                },
            })
            .unwrap_err();
        assert!(matches!(err, HubError::GroupNotFound { ref id } if id == "999"));
    }

    #[test]
    fn deleting_an_unknown_group_reports_group_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let err = app
            .run(Commands::Group {
                command: GroupCommands::Delete {
                    id: "999".to_string(),
                    force: true,
                },
            })
            .unwrap_err();
        assert!(matches!(err, HubError::GroupNotFound { ref id } if id == "999"));
    }
}
