//! Identifier types shared by the node model, the engine and the rule library
//!
//! Numeric values follow the UI Automation identifier ranges so that a tree
//! acquired from a live platform provider can be mapped without translation
//! tables.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a node within one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Property identifiers the engine can read from a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum PropertyId {
    RuntimeId = 30000,
    BoundingRectangle = 30001,
    ProcessId = 30002,
    ControlType = 30003,
    LocalizedControlType = 30004,
    Name = 30005,
    AcceleratorKey = 30006,
    AccessKey = 30007,
    HasKeyboardFocus = 30008,
    IsKeyboardFocusable = 30009,
    IsEnabled = 30010,
    AutomationId = 30011,
    ClassName = 30012,
    HelpText = 30013,
    IsControlElement = 30016,
    IsContentElement = 30017,
    IsPassword = 30019,
    ItemType = 30021,
    IsOffscreen = 30022,
    Orientation = 30023,
    FrameworkId = 30024,
    IsRequiredForForm = 30025,
    ItemStatus = 30026,
    IsExpandCollapsePatternAvailable = 30028,
    IsGridPatternAvailable = 30030,
    IsInvokePatternAvailable = 30031,
    IsScrollPatternAvailable = 30034,
    IsSelectionItemPatternAvailable = 30036,
    IsTextPatternAvailable = 30040,
    IsTogglePatternAvailable = 30041,
    IsValuePatternAvailable = 30043,
    PositionInSet = 30152,
    SizeOfSet = 30153,
    Level = 30154,
    LandmarkType = 30157,
    LocalizedLandmarkType = 30158,
    FullDescription = 30159,
    HeadingLevel = 30173,
    IsDialog = 30174,
}

impl PropertyId {
    /// Numeric identifier
    pub fn id(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Control patterns a node may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternId {
    ExpandCollapse,
    Grid,
    Invoke,
    Scroll,
    SelectionItem,
    Text,
    Toggle,
    Value,
}

impl PatternId {
    /// The boolean property that reports whether this pattern is available
    pub fn availability_property(self) -> PropertyId {
        match self {
            Self::ExpandCollapse => PropertyId::IsExpandCollapsePatternAvailable,
            Self::Grid => PropertyId::IsGridPatternAvailable,
            Self::Invoke => PropertyId::IsInvokePatternAvailable,
            Self::Scroll => PropertyId::IsScrollPatternAvailable,
            Self::SelectionItem => PropertyId::IsSelectionItemPatternAvailable,
            Self::Text => PropertyId::IsTextPatternAvailable,
            Self::Toggle => PropertyId::IsTogglePatternAvailable,
            Self::Value => PropertyId::IsValuePatternAvailable,
        }
    }
}

/// Typed identifiers for properties exposed through a control pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum PatternPropertyId {
    ValueValue = 30045,
    ValueIsReadOnly = 30046,
    GridRowCount = 30062,
    GridColumnCount = 30063,
    ExpandCollapseState = 30070,
    SelectionItemIsSelected = 30079,
    ToggleState = 30086,
    ScrollHorizontalViewSize = 30054,
    ScrollVerticalViewSize = 30056,
    ScrollHorizontallyScrollable = 30057,
    ScrollVerticallyScrollable = 30058,
}

impl PatternPropertyId {
    /// The pattern this property belongs to
    pub fn pattern(self) -> PatternId {
        match self {
            Self::ValueValue | Self::ValueIsReadOnly => PatternId::Value,
            Self::GridRowCount | Self::GridColumnCount => PatternId::Grid,
            Self::ExpandCollapseState => PatternId::ExpandCollapse,
            Self::SelectionItemIsSelected => PatternId::SelectionItem,
            Self::ToggleState => PatternId::Toggle,
            Self::ScrollHorizontalViewSize
            | Self::ScrollVerticalViewSize
            | Self::ScrollHorizontallyScrollable
            | Self::ScrollVerticallyScrollable => PatternId::Scroll,
        }
    }
}

impl fmt::Display for PatternPropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Control type of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum ControlType {
    Button = 50000,
    Calendar = 50001,
    CheckBox = 50002,
    ComboBox = 50003,
    Edit = 50004,
    Hyperlink = 50005,
    Image = 50006,
    ListItem = 50007,
    List = 50008,
    Menu = 50009,
    MenuBar = 50010,
    MenuItem = 50011,
    ProgressBar = 50012,
    RadioButton = 50013,
    ScrollBar = 50014,
    Slider = 50015,
    Spinner = 50016,
    StatusBar = 50017,
    Tab = 50018,
    TabItem = 50019,
    Text = 50020,
    ToolBar = 50021,
    ToolTip = 50022,
    Tree = 50023,
    TreeItem = 50024,
    Custom = 50025,
    Group = 50026,
    Thumb = 50027,
    DataGrid = 50028,
    DataItem = 50029,
    Document = 50030,
    SplitButton = 50031,
    Window = 50032,
    Pane = 50033,
    Header = 50034,
    HeaderItem = 50035,
    Table = 50036,
    TitleBar = 50037,
    Separator = 50038,
    SemanticZoom = 50039,
    AppBar = 50040,
}

impl ControlType {
    pub const ALL: [ControlType; 41] = [
        Self::Button,
        Self::Calendar,
        Self::CheckBox,
        Self::ComboBox,
        Self::Edit,
        Self::Hyperlink,
        Self::Image,
        Self::ListItem,
        Self::List,
        Self::Menu,
        Self::MenuBar,
        Self::MenuItem,
        Self::ProgressBar,
        Self::RadioButton,
        Self::ScrollBar,
        Self::Slider,
        Self::Spinner,
        Self::StatusBar,
        Self::Tab,
        Self::TabItem,
        Self::Text,
        Self::ToolBar,
        Self::ToolTip,
        Self::Tree,
        Self::TreeItem,
        Self::Custom,
        Self::Group,
        Self::Thumb,
        Self::DataGrid,
        Self::DataItem,
        Self::Document,
        Self::SplitButton,
        Self::Window,
        Self::Pane,
        Self::Header,
        Self::HeaderItem,
        Self::Table,
        Self::TitleBar,
        Self::Separator,
        Self::SemanticZoom,
        Self::AppBar,
    ];

    /// Numeric identifier
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Words a screen reader announces for this control type.
    ///
    /// Used by rules that reject names repeating the control type.
    pub fn spoken_words(self) -> &'static [&'static str] {
        match self {
            Self::Button => &["button"],
            Self::Calendar => &["calendar"],
            Self::CheckBox => &["check box", "checkbox"],
            Self::ComboBox => &["combo box", "combobox"],
            Self::Edit => &["edit"],
            Self::Hyperlink => &["hyperlink", "link"],
            Self::Image => &["image"],
            Self::ListItem => &["list item"],
            Self::List => &["list"],
            Self::Menu => &["menu"],
            Self::MenuBar => &["menu bar"],
            Self::MenuItem => &["menu item"],
            Self::ProgressBar => &["progress bar"],
            Self::RadioButton => &["radio button"],
            Self::ScrollBar => &["scroll bar", "scrollbar"],
            Self::Slider => &["slider"],
            Self::Spinner => &["spinner"],
            Self::StatusBar => &["status bar"],
            Self::Tab => &["tab"],
            Self::TabItem => &["tab item"],
            Self::Text => &["text"],
            Self::ToolBar => &["tool bar", "toolbar"],
            Self::ToolTip => &["tool tip", "tooltip"],
            Self::Tree => &["tree"],
            Self::TreeItem => &["tree item"],
            Self::Custom => &[],
            Self::Group => &["group"],
            Self::Thumb => &["thumb"],
            Self::DataGrid => &["data grid"],
            Self::DataItem => &["data item"],
            Self::Document => &["document"],
            Self::SplitButton => &["split button"],
            Self::Window => &["window"],
            Self::Pane => &["pane"],
            Self::Header => &["header"],
            Self::HeaderItem => &["header item"],
            Self::Table => &["table"],
            Self::TitleBar => &["title bar"],
            Self::Separator => &["separator"],
            Self::SemanticZoom => &["semantic zoom"],
            Self::AppBar => &["app bar"],
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Landmark type identifiers
pub mod landmark {
    pub const CUSTOM: i32 = 80000;
    pub const FORM: i32 = 80001;
    pub const MAIN: i32 = 80002;
    pub const NAVIGATION: i32 = 80003;
    pub const SEARCH: i32 = 80004;
}

/// Heading level identifiers
pub mod heading {
    pub const NONE: i32 = 80050;
    pub const LEVEL1: i32 = 80051;
    pub const LEVEL9: i32 = 80059;

    /// Heading level identifier for a 1-based level, if it is in range
    pub fn level(n: i32) -> Option<i32> {
        (1..=9).contains(&n).then_some(NONE + n)
    }
}

/// Stable identity of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    BoundingRectangleNotNull,
    BoundingRectangleNotAllZeros,
    BoundingRectangleContainedInParent,
    NameNotNull,
    NameNotEmpty,
    NameNotWhiteSpace,
    NameReasonableLength,
    NameExcludesControlType,
    NameExcludesPrivateUnicodeCharacters,
    IsKeyboardFocusableShouldBeTrue,
    SiblingUniqueAndFocusable,
    HeadingLevelDescendsWhenNested,
    HyperlinkSupportsInvokePattern,
    ComboBoxShouldNotSupportScrollPattern,
    ChildrenNotAllowedInContentView,
    ParentChildShouldNotHaveSameNameAndType,
    LandmarkOneMain,
    LandmarkBannerIsTopLevel,
}

impl RuleId {
    pub const ALL: [RuleId; 18] = [
        Self::BoundingRectangleNotNull,
        Self::BoundingRectangleNotAllZeros,
        Self::BoundingRectangleContainedInParent,
        Self::NameNotNull,
        Self::NameNotEmpty,
        Self::NameNotWhiteSpace,
        Self::NameReasonableLength,
        Self::NameExcludesControlType,
        Self::NameExcludesPrivateUnicodeCharacters,
        Self::IsKeyboardFocusableShouldBeTrue,
        Self::SiblingUniqueAndFocusable,
        Self::HeadingLevelDescendsWhenNested,
        Self::HyperlinkSupportsInvokePattern,
        Self::ComboBoxShouldNotSupportScrollPattern,
        Self::ChildrenNotAllowedInContentView,
        Self::ParentChildShouldNotHaveSameNameAndType,
        Self::LandmarkOneMain,
        Self::LandmarkBannerIsTopLevel,
    ];

    /// Symbolic name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoundingRectangleNotNull => "BoundingRectangleNotNull",
            Self::BoundingRectangleNotAllZeros => "BoundingRectangleNotAllZeros",
            Self::BoundingRectangleContainedInParent => "BoundingRectangleContainedInParent",
            Self::NameNotNull => "NameNotNull",
            Self::NameNotEmpty => "NameNotEmpty",
            Self::NameNotWhiteSpace => "NameNotWhiteSpace",
            Self::NameReasonableLength => "NameReasonableLength",
            Self::NameExcludesControlType => "NameExcludesControlType",
            Self::NameExcludesPrivateUnicodeCharacters => "NameExcludesPrivateUnicodeCharacters",
            Self::IsKeyboardFocusableShouldBeTrue => "IsKeyboardFocusableShouldBeTrue",
            Self::SiblingUniqueAndFocusable => "SiblingUniqueAndFocusable",
            Self::HeadingLevelDescendsWhenNested => "HeadingLevelDescendsWhenNested",
            Self::HyperlinkSupportsInvokePattern => "HyperlinkSupportsInvokePattern",
            Self::ComboBoxShouldNotSupportScrollPattern => "ComboBoxShouldNotSupportScrollPattern",
            Self::ChildrenNotAllowedInContentView => "ChildrenNotAllowedInContentView",
            Self::ParentChildShouldNotHaveSameNameAndType => {
                "ParentChildShouldNotHaveSameNameAndType"
            }
            Self::LandmarkOneMain => "LandmarkOneMain",
            Self::LandmarkBannerIsTopLevel => "LandmarkBannerIsTopLevel",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = Error;

    /// Parse a symbolic name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("unknown rule '{}'", s)))
    }
}
