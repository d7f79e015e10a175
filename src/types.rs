//! Core data structures for the content-hub application.
//!
//! This module contains the primary types used throughout the application:
//! the Group, ContentItem and StatLog records, the AppData root aggregate,
//! and the CLI command definitions.
use std::{fmt, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::HubError;

/// A specialized Result type for content-hub operations.
pub type Result<T> = std::result::Result<T, HubError>;

/// The distinguished fallback group. It always exists and is never deleted.
pub const GENERAL_GROUP_ID: &str = "1";

/// Icon assigned to groups that have none persisted.
pub const DEFAULT_GROUP_ICON: &str = "folder";

/// A named collection of content items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique, stable identifier (opaque; time-based allocation)
    pub id: String,
    /// Display name, non-empty
    pub name: String,
    /// Symbolic icon name, interpreted by the view layer
    #[serde(default = "default_group_icon")]
    pub icon: String,
    /// When the group was created
    pub created_at: DateTime<Utc>,
    /// How many times the group has been made active
    #[serde(default)]
    pub access_count: u64,
}

fn default_group_icon() -> String {
    DEFAULT_GROUP_ICON.to_string()
}

/// Discriminant of a content item, also usable as a CLI filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Note,
    Link,
    Image,
    Todo,
}

/// Display hint for how an item is rendered. Opaque to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    #[default]
    Default,
    Highlighted,
    Minimalist,
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Aspect::Default => "default",
            Aspect::Highlighted => "highlighted",
            Aspect::Minimalist => "minimalist",
        };
        f.write_str(name)
    }
}

/// A single entry of a todo item's task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the owning item
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Variant-specific payload of a content item, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemPayload {
    /// Free text, may be markdown-formatted
    Note { content: String },
    /// Opaque URL string; not validated beyond non-empty at the UI layer
    Link { url: String },
    /// Remote URL or base64 data URL; opaque to the store
    Image { url: String },
    /// Ordered task list
    Todo {
        #[serde(default)]
        tasks: Vec<Task>,
    },
}

/// A single piece of content belonging to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique, stable identifier
    pub id: String,
    /// Foreign key into Group.id
    pub group_id: String,
    /// Display title, non-empty
    pub title: String,
    /// Ordered, duplicate-free tag list
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// How many times the item has been opened
    pub access_count: u64,
    /// When the item was last opened, None until first access
    pub last_accessed: Option<DateTime<Utc>>,
    /// Symbolic icon name, interpreted by the view layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display hint
    #[serde(default)]
    pub aspect: Aspect,
    /// Variant payload; serializes flat alongside the common fields
    #[serde(flatten)]
    pub payload: ItemPayload,
}

impl ContentItem {
    /// Returns the discriminant of this item's payload.
    pub fn item_type(&self) -> ItemType {
        match self.payload {
            ItemPayload::Note { .. } => ItemType::Note,
            ItemPayload::Link { .. } => ItemType::Link,
            ItemPayload::Image { .. } => ItemType::Image,
            ItemPayload::Todo { .. } => ItemType::Todo,
        }
    }
}

/// Fields supplied by the caller when creating a new item. The store
/// allocates the id and stamps the bookkeeping fields itself.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub group_id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub icon: Option<String>,
    pub aspect: Aspect,
    pub payload: ItemPayload,
}

/// What an access-log entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Group,
    Item,
}

/// Append-only access event, the time-series source for usage analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLog {
    pub id: String,
    /// Group id or ContentItem id
    pub target_id: String,
    pub target_type: TargetType,
    pub timestamp: DateTime<Utc>,
}

/// Root aggregate of all persisted state. Read and written atomically as
/// one unit on every persistence cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub groups: Vec<Group>,
    pub items: Vec<ContentItem>,
    pub stats: Vec<StatLog>,
}

impl AppData {
    /// The initial aggregate used when no persisted state exists:
    /// a single General group, no items, no stats.
    pub fn with_general() -> Self {
        AppData {
            groups: vec![Group {
                id: GENERAL_GROUP_ID.to_string(),
                name: "General".to_string(),
                icon: DEFAULT_GROUP_ICON.to_string(),
                created_at: Utc::now(),
                access_count: 0,
            }],
            items: Vec::new(),
            stats: Vec::new(),
        }
    }
}

/// Order applied to the derived item view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SortOrder {
    /// Newest first
    #[default]
    #[serde(rename = "createdAt_desc")]
    #[value(name = "created-desc")]
    CreatedDesc,
    /// Oldest first
    #[serde(rename = "createdAt_asc")]
    #[value(name = "created-asc")]
    CreatedAsc,
    /// Most accessed first
    #[serde(rename = "accessCount_desc")]
    #[value(name = "accessed-desc")]
    AccessDesc,
    /// Lexicographic by title
    #[serde(rename = "title_asc")]
    #[value(name = "title")]
    TitleAsc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::CreatedDesc => "created-desc",
            SortOrder::CreatedAsc => "created-asc",
            SortOrder::AccessDesc => "accessed-desc",
            SortOrder::TitleAsc => "title",
        };
        f.write_str(name)
    }
}

/// Flags shared by every `add` subcommand.
#[derive(Args, Debug)]
pub struct CommonItemArgs {
    /// Tags to associate with the item (comma-separated)
    #[clap(short = 't', long)]
    pub tags: Option<String>,

    /// Target group id (defaults to the active group)
    #[clap(short, long)]
    pub group: Option<String>,

    /// Icon name shown by the view layer
    #[clap(long)]
    pub icon: Option<String>,

    /// Display aspect
    #[clap(long, value_enum, default_value_t = Aspect::Default)]
    pub aspect: Aspect,
}

/// Available subcommands for the content-hub application
#[derive(Subcommand)]
pub enum Commands {
    /// Manage content groups
    Group {
        #[clap(subcommand)]
        command: GroupCommands,
    },

    /// Add a new content item
    Add {
        #[clap(subcommand)]
        item: AddCommands,
    },

    /// List items in a group with filtering, search and sorting
    List {
        /// Group to browse (defaults to the first group)
        #[clap(short, long)]
        group: Option<String>,

        /// Only show items of this type
        #[clap(short = 'T', long = "type", value_enum)]
        item_type: Option<ItemType>,

        /// Case-insensitive search over titles, tags and content
        #[clap(short, long)]
        search: Option<String>,

        /// Sort order
        #[clap(long, value_enum, default_value_t = SortOrder::CreatedDesc)]
        sort: SortOrder,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// View an item by ID (records an access)
    View {
        /// ID of the item to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Edit an existing item
    Edit {
        /// ID of the item to edit
        id: String,

        /// New title for the item
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New note content
        #[clap(short, long)]
        content: Option<String>,

        /// New link or image URL
        #[clap(short, long)]
        url: Option<String>,

        /// Replacement tags (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,
    },

    /// Toggle a todo task's completed state
    Toggle {
        /// ID of the todo item
        id: String,

        /// ID of the task within the item
        task_id: String,
    },

    /// Delete an item by ID
    Delete {
        /// ID of the item to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Move an item to another group
    Move {
        /// ID of the item to move
        id: String,

        /// Target group id
        group: String,
    },

    /// Duplicate an item within its group
    Duplicate {
        /// ID of the item to duplicate
        id: String,
    },

    /// Export all data to a backup file
    Export {
        /// Directory for the backup file (defaults to the current directory)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a backup file, replacing all current data
    Import {
        /// Path to the backup file
        file: PathBuf,
    },
}

/// Group management subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new group
    Add {
        /// Name of the group
        name: String,

        /// Icon name shown by the view layer
        #[clap(short, long)]
        icon: Option<String>,
    },

    /// Rename or re-icon a group
    Update {
        /// ID of the group to update
        id: String,

        /// New name
        name: String,

        /// New icon (omitted leaves the icon untouched)
        #[clap(short, long)]
        icon: Option<String>,
    },

    /// Delete a group and all of its items
    Delete {
        /// ID of the group to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// List all groups
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },
}

/// Subcommands for adding each kind of content item
#[derive(Subcommand)]
pub enum AddCommands {
    /// Add a markdown note
    Note {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Content of the note, can be markdown formatted
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,

        #[clap(flatten)]
        common: CommonItemArgs,
    },

    /// Add a link
    Link {
        /// Title of the link
        #[clap(short = 'T', long)]
        title: String,

        /// The URL
        url: String,

        #[clap(flatten)]
        common: CommonItemArgs,
    },

    /// Add an image by URL or data URL
    Image {
        /// Title of the image
        #[clap(short = 'T', long)]
        title: String,

        /// Remote URL or base64 data URL
        url: String,

        #[clap(flatten)]
        common: CommonItemArgs,
    },

    /// Add a todo list
    Todo {
        /// Title of the todo list
        #[clap(short = 'T', long)]
        title: String,

        /// A task entry; repeat the flag for multiple tasks
        #[clap(short = 'i', long = "task")]
        tasks: Vec<String>,

        #[clap(flatten)]
        common: CommonItemArgs,
    },
}
