//! The registry of sample apps gonut knows how to push.

use std::collections::HashMap;

use crate::domain::error::{CatalogError, ConfigError};

/// Prefix of every application name gonut pushes. Used to recognise gonut
/// apps on a platform.
pub const APP_PREFIX: &str = "gonut";

/// Selector that runs every sample app in catalog order.
pub const ALL_SELECTOR: &str = "all";

/// One push-able sample application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleApp {
    /// Display name, e.g. `"NodeJS"`.
    pub caption: &'static str,
    /// Buildpack that must be installed for the push to make sense.
    pub buildpack: &'static str,
    /// Primary selector used on the command line.
    pub selector: &'static str,
    /// Additional selectors resolving to this app.
    pub aliases: &'static [&'static str],
    /// Prefix of the generated application name.
    pub app_name_prefix: &'static str,
    /// Key of the bundle in the content source.
    pub asset: &'static str,
}

impl SampleApp {
    /// Primary selector followed by all aliases.
    pub fn selectors(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.selector).chain(self.aliases.iter().copied())
    }
}

const BUILTIN: &[SampleApp] = &[
    SampleApp {
        caption: "Golang",
        buildpack: "go_buildpack",
        selector: "golang",
        aliases: &["go"],
        app_name_prefix: "gonut-golang-app-",
        asset: "golang",
    },
    SampleApp {
        caption: "Python",
        buildpack: "python_buildpack",
        selector: "python",
        aliases: &[],
        app_name_prefix: "gonut-python-app-",
        asset: "python",
    },
    SampleApp {
        caption: "PHP",
        buildpack: "php_buildpack",
        selector: "php",
        aliases: &[],
        app_name_prefix: "gonut-php-app-",
        asset: "php",
    },
    SampleApp {
        caption: "Staticfile",
        buildpack: "staticfile_buildpack",
        selector: "staticfile",
        aliases: &["static"],
        app_name_prefix: "gonut-staticfile-app-",
        asset: "staticfile",
    },
    SampleApp {
        caption: "Swift",
        buildpack: "swift_buildpack",
        selector: "swift",
        aliases: &[],
        app_name_prefix: "gonut-swift-app-",
        asset: "swift",
    },
    SampleApp {
        caption: "NodeJS",
        buildpack: "nodejs_buildpack",
        selector: "nodejs",
        aliases: &["node"],
        app_name_prefix: "gonut-nodejs-app-",
        asset: "nodejs",
    },
    SampleApp {
        caption: "Ruby",
        buildpack: "ruby_buildpack",
        selector: "ruby",
        aliases: &[],
        app_name_prefix: "gonut-ruby-sinatra-app-",
        asset: "ruby",
    },
    SampleApp {
        caption: ".NET",
        buildpack: "dotnet-core",
        selector: "dotnet",
        aliases: &[],
        app_name_prefix: "gonut-dotnet-app-",
        asset: "dotnet",
    },
    SampleApp {
        caption: "Binary",
        buildpack: "binary_buildpack",
        selector: "binary",
        aliases: &[],
        app_name_prefix: "gonut-binary-app-",
        asset: "binary",
    },
    SampleApp {
        caption: "Java",
        buildpack: "java_buildpack",
        selector: "java",
        aliases: &[],
        app_name_prefix: "gonut-java-app-",
        asset: "java",
    },
];

/// Ordered, read-only collection of sample apps with unique selectors.
#[derive(Debug, Clone)]
pub struct Catalog {
    apps: Vec<SampleApp>,
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting selector or alias collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if two apps share a selector or alias, or if an app
    /// claims the reserved `all` selector.
    pub fn new(apps: Vec<SampleApp>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        for (position, app) in apps.iter().enumerate() {
            for name in app.selectors() {
                if name == ALL_SELECTOR {
                    return Err(CatalogError::ReservedIdentifier(name.to_string()));
                }
                if let Some(previous) = index.insert(name, position) {
                    return Err(CatalogError::DuplicateIdentifier {
                        name: name.to_string(),
                        first: apps[previous].selector.to_string(),
                        second: app.selector.to_string(),
                    });
                }
            }
        }
        Ok(Self { apps, index })
    }

    /// The catalog of sample apps embedded in the gonut binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in list violates the catalog invariants.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(BUILTIN.to_vec())
    }

    /// Resolve a selector or alias. Matching is case-sensitive.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SampleApp> {
        self.index.get(name).map(|&i| &self.apps[i])
    }

    /// Resolve a selector or alias, producing a configuration error that
    /// lists valid selectors when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDescriptor`] if no app matches.
    pub fn resolve(&self, name: &str) -> Result<&SampleApp, ConfigError> {
        self.lookup(name).ok_or_else(|| ConfigError::UnknownDescriptor {
            name: name.to_string(),
            valid: self.selectors().collect::<Vec<_>>().join(", "),
        })
    }

    /// Apps in declared order.
    pub fn iter(&self) -> std::slice::Iter<'_, SampleApp> {
        self.apps.iter()
    }

    /// Primary selectors in declared order.
    pub fn selectors(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.apps.iter().map(|a| a.selector)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SampleApp;
    type IntoIter = std::slice::Iter<'a, SampleApp>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
