//! The scope: a dispatcher's registry of named values.
//!
//! Entries arrive by importing [`Source`]s (methods are bound to their
//! source on the way in), by plain assignment ([`Scope::set`]), or through
//! the define/alter pair. Multi-segment paths walk nested
//! [`Value::Map`] namespaces.

use sish_core::{Function, Map, Path, Result, SishError, Source, Target, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

// ============================================================================
// Import configuration
// ============================================================================

/// Which properties an import copies, and under which names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every own property of the source.
    #[default]
    All,
    /// The listed properties, under their own names.
    Names(Vec<String>),
    /// `(destination, source name)` pairs.
    Aliases(Vec<(String, String)>),
}

impl Filter {
    /// Copy the listed properties verbatim.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Names(names.into_iter().map(Into::into).collect())
    }

    /// Copy `source name` into `destination` for each pair.
    pub fn aliases<I, D, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (D, S)>,
        D: Into<String>,
        S: Into<String>,
    {
        Filter::Aliases(
            pairs
                .into_iter()
                .map(|(dest, src)| (dest.into(), src.into()))
                .collect(),
        )
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn kind(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Names(_) => "names",
            Filter::Aliases(_) => "aliases",
        }
    }
}

impl From<&[&str]> for Filter {
    fn from(names: &[&str]) -> Self {
        Filter::names(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Filter {
    fn from(names: [&str; N]) -> Self {
        Filter::names(names)
    }
}

impl From<Vec<String>> for Filter {
    fn from(names: Vec<String>) -> Self {
        Filter::Names(names)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Filter {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Filter::aliases(pairs)
    }
}

impl From<std::collections::BTreeMap<String, String>> for Filter {
    fn from(pairs: std::collections::BTreeMap<String, String>) -> Self {
        Filter::aliases(pairs)
    }
}

impl From<Option<Filter>> for Filter {
    fn from(filter: Option<Filter>) -> Self {
        filter.unwrap_or_default()
    }
}

/// What an import does when a destination name is already bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionMode {
    /// Later imports replace earlier entries.
    #[default]
    Overwrite,
    /// Fail with [`SishError::AlreadyTaken`].
    Reject,
}

/// Options for [`Scope::import_with`].
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Which properties to copy.
    pub filter: Filter,
    /// Behaviour on name collisions.
    pub collision: CollisionMode,
    /// Import under this namespace instead of the top level.
    pub namespace: Option<String>,
}

impl ImportOptions {
    /// Import everything, overwriting, at the top level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the property filter.
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the collision mode.
    pub fn with_collision(mut self, collision: CollisionMode) -> Self {
        self.collision = collision;
        self
    }

    /// Fail instead of overwriting existing entries.
    pub fn reject_collisions(self) -> Self {
        self.with_collision(CollisionMode::Reject)
    }

    /// Place the imported entries under `namespace`.
    pub fn namespaced(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

// ============================================================================
// Scope
// ============================================================================

/// A registry of named values owned by one dispatcher.
///
/// Every function imported from a source is already bound to that source,
/// so calling it through the scope behaves exactly like calling the method
/// on the source itself.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    entries: Map,
    defined: BTreeSet<Path>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy properties of `source` selected by `filter`.
    ///
    /// ```rust,ignore
    /// scope.import(&source, Filter::All)?;
    /// scope.import(&source, ["log", "warn"])?;
    /// scope.import(&source, [("hello", "greet")])?;
    /// ```
    pub fn import<S: Source>(&mut self, source: &Arc<S>, filter: impl Into<Filter>) -> Result<()> {
        self.import_with(source, ImportOptions::new().with_filter(filter))
    }

    /// Copy properties of `source` as configured by `options`.
    ///
    /// The import is all-or-nothing: every property is looked up and every
    /// collision checked before the first entry is written.
    pub fn import_with<S: Source>(&mut self, source: &Arc<S>, options: ImportOptions) -> Result<()> {
        // Namespaces are a single segment.
        if let Some(ns) = &options.namespace {
            if ns.is_empty() || ns.contains('.') {
                return Err(SishError::NotANamespace(ns.clone()));
            }
        }

        let pairs: Vec<(String, String)> = match &options.filter {
            Filter::All => source.keys().into_iter().map(|k| (k.clone(), k)).collect(),
            Filter::Names(names) => names.iter().map(|n| (n.clone(), n.clone())).collect(),
            Filter::Aliases(pairs) => pairs.clone(),
        };

        let mut staged = Vec::with_capacity(pairs.len());
        for (dest, key) in pairs {
            let property = source
                .property(&key)
                .ok_or_else(|| SishError::NotDefined(key.clone()))?;
            staged.push((dest, property.bind(source, &key)));
        }

        let qualify = |name: &str| match &options.namespace {
            Some(ns) => format!("{}.{}", ns, name),
            None => name.to_string(),
        };

        let existing = match &options.namespace {
            None => Some(&self.entries),
            Some(ns) => match self.entries.get(ns) {
                None => None,
                Some(Value::Map(map)) => Some(map),
                Some(_) => return Err(SishError::NotANamespace(ns.clone())),
            },
        };

        if options.collision == CollisionMode::Reject {
            let mut seen = BTreeSet::new();
            for (dest, _) in &staged {
                let taken = existing.is_some_and(|map| map.contains_key(dest));
                if taken || !seen.insert(dest.as_str()) {
                    return Err(SishError::AlreadyTaken(qualify(dest)));
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            count = staged.len(),
            filter = options.filter.kind(),
            collision = ?options.collision,
            namespace = ?options.namespace,
            "importing source properties"
        );

        let target = match &options.namespace {
            None => &mut self.entries,
            Some(ns) => self
                .entries
                .entry(ns.clone())
                .or_insert_with(|| Value::Map(Map::new()))
                .as_map_mut()
                .ok_or_else(|| SishError::NotANamespace(ns.clone()))?,
        };
        target.extend(staged);
        Ok(())
    }

    /// Assign a top-level entry, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Assign an entry at `path`, creating intermediate namespaces.
    pub fn set_path(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<Option<Value>> {
        let path = path.into();
        let leaf = leaf(&path)?.to_string();
        let parent = self.parent_mut(&path, true)?;
        Ok(parent.insert(leaf, value.into()))
    }

    /// Top-level lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Walk `path` through nested namespaces.
    ///
    /// A top-level entry whose name is the whole dotted path (as imported
    /// from a source key containing dots) wins over the nested walk.
    /// Fails with [`SishError::NotDefined`] naming the path up to the first
    /// missing segment.
    pub fn resolve(&self, path: &Path) -> Result<&Value> {
        if path.len() > 1 {
            if let Some(value) = self.entries.get(&path.to_string()) {
                return Ok(value);
            }
        }
        let mut segments = path.segments().iter();
        let first = segments
            .next()
            .ok_or_else(|| SishError::NotDefined(String::new()))?;
        let mut current = self
            .entries
            .get(first)
            .ok_or_else(|| SishError::NotDefined(path.prefix(1)))?;
        for (depth, segment) in segments.enumerate() {
            current = current
                .as_map()
                .and_then(|map| map.get(segment))
                .ok_or_else(|| SishError::NotDefined(path.prefix(depth + 2)))?;
        }
        Ok(current)
    }

    /// Resolve a dispatch target to a value.
    ///
    /// Functions and raw values resolve to themselves; paths are walked.
    pub fn resolve_target(&self, target: &Target) -> Result<Value> {
        match target {
            Target::Path(path) => self.resolve(path).cloned(),
            Target::Function(function) => Ok(Value::Function(function.clone())),
            Target::Value(value) => Ok(value.clone()),
        }
    }

    /// Returns true if `path` resolves.
    pub fn contains(&self, path: impl Into<Path>) -> bool {
        self.resolve(&path.into()).is_ok()
    }

    // ------------------------------------------------------------------------
    // def / alter / defined
    // ------------------------------------------------------------------------

    /// Define a new entry, remembering it for [`Scope::defined`].
    ///
    /// Dotted names create intermediate namespaces. Fails with
    /// [`SishError::AlreadyDefined`] if the path is already bound; the
    /// existing binding is left untouched.
    pub fn def(&mut self, name: impl Into<Path>, value: impl Into<Value>) -> Result<()> {
        let path = name.into();
        if self.resolve(&path).is_ok() {
            return Err(SishError::AlreadyDefined(path.to_string()));
        }
        self.set_path(path.clone(), value)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(name = %path, "defined scope entry");

        self.defined.insert(path);
        Ok(())
    }

    /// Rebind an existing entry, returning the value it replaced.
    ///
    /// Fails with [`SishError::NotDefined`] if any segment of the path is
    /// missing.
    pub fn alter(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<Value> {
        let path = path.into();
        let slot = self.slot_mut(&path)?;
        let previous = std::mem::replace(slot, value.into());

        #[cfg(feature = "tracing")]
        tracing::debug!(name = %path, "altered scope entry");

        Ok(previous)
    }

    /// The curried form of [`Scope::alter`]: fix the path now, supply the
    /// value later.
    ///
    /// ```rust,ignore
    /// scope.alter_at("config.level").to("debug")?;
    /// ```
    pub fn alter_at(&mut self, path: impl Into<Path>) -> Alter<'_> {
        Alter {
            scope: self,
            path: path.into(),
        }
    }

    /// Entries registered through [`Scope::def`].
    ///
    /// With a prefix, only names under that dotted prefix are returned and
    /// the prefix is stripped from their keys. Values reflect any later
    /// [`Scope::alter`].
    pub fn defined(&self, prefix: Option<&str>) -> Map {
        let prefix = prefix
            .map(|p| p.trim_matches('.'))
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}.", p));
        self.defined
            .iter()
            .filter_map(|path| {
                let name = path.to_string();
                let key = match &prefix {
                    Some(prefix) => name.strip_prefix(prefix.as_str())?.to_string(),
                    None => name.clone(),
                };
                let value = self.resolve(path).ok()?;
                Some((key, value.clone()))
            })
            .collect()
    }

    /// Curry the function found at `target`. See [`crate::curry::curry`].
    pub fn curry(&self, target: impl Into<Target>) -> Result<Function> {
        let target = target.into();
        match self.resolve_target(&target)? {
            Value::Function(function) => Ok(crate::curry::curry(&function)),
            _ => Err(SishError::NotAFunction(target.to_string())),
        }
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the scope has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level entry names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All entries (for advanced use).
    pub fn entries(&self) -> &Map {
        &self.entries
    }

    // ------------------------------------------------------------------------
    // Path walking
    // ------------------------------------------------------------------------

    fn slot_mut(&mut self, path: &Path) -> Result<&mut Value> {
        let verbatim = path.to_string();
        if path.len() > 1 && self.entries.contains_key(&verbatim) {
            return self
                .entries
                .get_mut(&verbatim)
                .ok_or(SishError::NotDefined(verbatim));
        }
        let leaf = leaf(path)?;
        let parent = self.parent_mut(path, false)?;
        parent
            .get_mut(leaf)
            .ok_or_else(|| SishError::NotDefined(path.to_string()))
    }

    /// The namespace holding the leaf of `path`.
    fn parent_mut(&mut self, path: &Path, create: bool) -> Result<&mut Map> {
        let segments = path.segments();
        let parents = &segments[..segments.len().saturating_sub(1)];
        let mut map = &mut self.entries;
        for (depth, segment) in parents.iter().enumerate() {
            let slot = if create {
                map.entry(segment.clone())
                    .or_insert_with(|| Value::Map(Map::new()))
            } else {
                map.get_mut(segment)
                    .ok_or_else(|| SishError::NotDefined(path.prefix(depth + 1)))?
            };
            map = match slot {
                Value::Map(inner) => inner,
                _ if create => return Err(SishError::NotANamespace(path.prefix(depth + 1))),
                _ => return Err(SishError::NotDefined(path.prefix(depth + 2))),
            };
        }
        Ok(map)
    }
}

fn leaf(path: &Path) -> Result<&str> {
    path.leaf()
        .ok_or_else(|| SishError::NotDefined(String::new()))
}

/// A pending [`Scope::alter`] awaiting its value.
pub struct Alter<'a> {
    scope: &'a mut Scope,
    path: Path,
}

impl Alter<'_> {
    /// The path that will be rebound.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Supply the value and perform the alteration.
    pub fn to(self, value: impl Into<Value>) -> Result<Value> {
        self.scope.alter(self.path, value)
    }
}
