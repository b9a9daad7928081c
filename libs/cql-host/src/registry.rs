//! Host class table.
//!
//! Every class the module exposes is registered once at startup with its
//! parent, the interfaces it implements and whether it is final.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::ExceptionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    Exception,
    Value,
    Numeric,
    UuidInterface,
    Countable,
    Iterator,
    Statement,
    TimestampGenerator,
    RetryPolicy,
}

impl Interface {
    pub fn name(self) -> &'static str {
        match self {
            Interface::Exception => "Cassandra\\Exception",
            Interface::Value => "Cassandra\\Value",
            Interface::Numeric => "Cassandra\\Numeric",
            Interface::UuidInterface => "Cassandra\\UuidInterface",
            Interface::Countable => "Countable",
            Interface::Iterator => "Iterator",
            Interface::Statement => "Cassandra\\Statement",
            Interface::TimestampGenerator => "Cassandra\\TimestampGenerator",
            Interface::RetryPolicy => "Cassandra\\RetryPolicy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Exception,
    Value,
    Type,
    Other,
}

#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub kind: ClassKind,
    pub interfaces: &'static [Interface],
    pub is_final: bool,
    pub is_abstract: bool,
}

const NUMERIC: &[Interface] = &[Interface::Value, Interface::Numeric];
const VALUE: &[Interface] = &[Interface::Value];
const UUID: &[Interface] = &[Interface::Value, Interface::UuidInterface];
const ITERABLE: &[Interface] = &[Interface::Value, Interface::Countable, Interface::Iterator];

const VALUE_CLASSES: &[(&str, &[Interface])] = &[
    ("Cassandra\\Bigint", NUMERIC),
    ("Cassandra\\Smallint", NUMERIC),
    ("Cassandra\\Tinyint", NUMERIC),
    ("Cassandra\\Varint", NUMERIC),
    ("Cassandra\\Decimal", NUMERIC),
    ("Cassandra\\Float", NUMERIC),
    ("Cassandra\\Blob", VALUE),
    ("Cassandra\\Inet", VALUE),
    ("Cassandra\\Timestamp", VALUE),
    ("Cassandra\\Date", VALUE),
    ("Cassandra\\Time", VALUE),
    ("Cassandra\\Duration", VALUE),
    ("Cassandra\\Uuid", UUID),
    ("Cassandra\\Timeuuid", UUID),
    ("Cassandra\\Set", ITERABLE),
    ("Cassandra\\Map", ITERABLE),
    ("Cassandra\\Collection", ITERABLE),
    ("Cassandra\\Tuple", ITERABLE),
    ("Cassandra\\UserTypeValue", ITERABLE),
];

const TYPE_CLASSES: &[&str] = &[
    "Cassandra\\Type\\Scalar",
    "Cassandra\\Type\\Set",
    "Cassandra\\Type\\Map",
    "Cassandra\\Type\\Collection",
    "Cassandra\\Type\\Tuple",
    "Cassandra\\Type\\UserType",
    "Cassandra\\Type\\Custom",
];

const OTHER_CLASSES: &[(&str, &[Interface])] = &[
    ("Cassandra\\SSLOptions", &[]),
    ("Cassandra\\SSLOptions\\Builder", &[]),
    ("Cassandra\\Cluster\\Builder", &[]),
    ("Cassandra\\SimpleStatement", &[Interface::Statement]),
    ("Cassandra\\TimestampGenerator\\Monotonic", &[Interface::TimestampGenerator]),
    ("Cassandra\\TimestampGenerator\\ServerSide", &[Interface::TimestampGenerator]),
    ("Cassandra\\RetryPolicy\\DefaultPolicy", &[Interface::RetryPolicy]),
    ("Cassandra\\RetryPolicy\\DowngradingConsistency", &[Interface::RetryPolicy]),
    ("Cassandra\\RetryPolicy\\Fallthrough", &[Interface::RetryPolicy]),
    ("Cassandra\\RetryPolicy\\Logging", &[Interface::RetryPolicy]),
];

#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: Vec<ClassEntry>,
    index: HashMap<&'static str, usize>,
}

impl ClassRegistry {
    /// Build the table of every class the module exposes.
    pub fn initialize() -> Self {
        let mut registry = ClassRegistry::default();

        for kind in ExceptionKind::ALL {
            registry.register(ClassEntry {
                name: kind.class_name(),
                parent: kind.parent().map(ExceptionKind::class_name),
                kind: ClassKind::Exception,
                interfaces: &[Interface::Exception],
                is_final: false,
                is_abstract: false,
            });
        }

        // Custom is extended by user classes.
        registry.register(ClassEntry {
            name: "Cassandra\\Custom",
            parent: None,
            kind: ClassKind::Value,
            interfaces: VALUE,
            is_final: false,
            is_abstract: true,
        });
        for &(name, interfaces) in VALUE_CLASSES {
            registry.register(ClassEntry {
                name,
                parent: None,
                kind: ClassKind::Value,
                interfaces,
                is_final: true,
                is_abstract: false,
            });
        }

        registry.register(ClassEntry {
            name: "Cassandra\\Type",
            parent: None,
            kind: ClassKind::Type,
            interfaces: &[],
            is_final: false,
            is_abstract: true,
        });
        for &name in TYPE_CLASSES {
            registry.register(ClassEntry {
                name,
                parent: Some("Cassandra\\Type"),
                kind: ClassKind::Type,
                interfaces: &[],
                is_final: true,
                is_abstract: false,
            });
        }

        for &(name, interfaces) in OTHER_CLASSES {
            registry.register(ClassEntry {
                name,
                parent: None,
                kind: ClassKind::Other,
                interfaces,
                is_final: true,
                is_abstract: false,
            });
        }

        tracing::info!(classes = registry.len(), "registered classes");
        registry
    }

    /// Process-wide registry, initialized on first use.
    pub fn global() -> &'static ClassRegistry {
        static GLOBAL: OnceLock<ClassRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ClassRegistry::initialize)
    }

    fn register(&mut self, entry: ClassEntry) {
        self.index.insert(entry.name, self.classes.len());
        self.classes.push(entry);
    }

    pub fn get(&self, name: &str) -> Option<&ClassEntry> {
        let name = name.strip_prefix('\\').unwrap_or(name);
        self.index.get(name).map(|&i| &self.classes[i])
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.iter()
    }

    /// Whether `class` or one of its ancestors implements `interface`.
    pub fn implements(&self, class: &str, interface: Interface) -> bool {
        self.ancestry(class).any(|e| e.interfaces.contains(&interface))
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        self.ancestry(class).any(|e| e.name == ancestor)
    }

    fn ancestry<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a ClassEntry> + 'a {
        std::iter::successors(self.get(class), move |e| e.parent.and_then(|p| self.get(p)))
    }
}
