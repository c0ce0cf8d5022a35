//! The capability registry: the closed set of functions a formula may call.
//!
//! Name resolution against this registry happens once, at validation time;
//! evaluation dispatches through resolved handles so no late-bound name can
//! escape the allow-list. The set is deterministic by construction — there
//! are no volatile functions and no function whose result depends on
//! evaluation order.

use crate::error::FormulaResult;
use crate::functions::{filter, math, statistical, transform};
use crate::value::Value;
use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Function families, mirrored in the boundary capability listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Element-wise math (`sin`, `sqrt`, ...)
    Math,
    /// Column reductions (`mean`, `std`, ...)
    Statistical,
    /// Column-to-column transforms (`normalize`, `scale`, ...)
    Transform,
    /// Windowed filters (`moving_average`, `gaussian_filter`, ...)
    Filter,
}

impl Category {
    /// Human-readable family name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Math => "math",
            Category::Statistical => "statistical",
            Category::Transform => "transform",
            Category::Filter => "filter",
        }
    }
}

/// Function implementation signature
pub type CapabilityImpl = fn(&[Value]) -> FormulaResult<Value>;

/// A registered capability
#[derive(Debug)]
pub struct CapabilityDef {
    /// Function name as written in formulas
    pub name: &'static str,
    /// Family
    pub category: Category,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: CapabilityImpl,
}

/// The capability registry
pub struct CapabilityRegistry {
    functions: AHashMap<&'static str, CapabilityDef>,
}

impl CapabilityRegistry {
    /// Create a registry with the full built-in capability set
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register_math();
        registry.register_statistical();
        registry.register_transform();
        registry.register_filter();

        registry
    }

    /// Look up a capability by name
    pub fn get(&self, name: &str) -> Option<&CapabilityDef> {
        self.functions.get(name)
    }

    /// Whether `name` is a registered capability
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// All capability names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Capability names of one family, sorted
    pub fn names_in(&self, category: Category) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .functions
            .values()
            .filter(|def| def.category == category)
            .map(|def| def.name)
            .collect();
        names.sort_unstable();
        names
    }

    fn register(&mut self, def: CapabilityDef) {
        self.functions.insert(def.name, def);
    }

    fn register_math(&mut self) {
        for (name, implementation) in [
            ("sin", math::fn_sin as CapabilityImpl),
            ("cos", math::fn_cos),
            ("tan", math::fn_tan),
            ("log", math::fn_log),
            ("exp", math::fn_exp),
            ("sqrt", math::fn_sqrt),
            ("abs", math::fn_abs),
            ("floor", math::fn_floor),
            ("ceil", math::fn_ceil),
            ("round", math::fn_round),
        ] {
            self.register(CapabilityDef {
                name,
                category: Category::Math,
                min_args: 1,
                max_args: Some(1),
                implementation,
            });
        }
    }

    fn register_statistical(&mut self) {
        for (name, implementation) in [
            ("mean", statistical::fn_mean as CapabilityImpl),
            ("std", statistical::fn_std),
            ("var", statistical::fn_var),
            ("median", statistical::fn_median),
            ("min", statistical::fn_min),
            ("max", statistical::fn_max),
            ("sum", statistical::fn_sum),
            ("count", statistical::fn_count),
        ] {
            self.register(CapabilityDef {
                name,
                category: Category::Statistical,
                min_args: 1,
                max_args: Some(1),
                implementation,
            });
        }

        self.register(CapabilityDef {
            name: "quantile",
            category: Category::Statistical,
            min_args: 2,
            max_args: Some(2),
            implementation: statistical::fn_quantile,
        });
    }

    fn register_transform(&mut self) {
        self.register(CapabilityDef {
            name: "normalize",
            category: Category::Transform,
            min_args: 1,
            max_args: Some(1),
            implementation: transform::fn_normalize,
        });
        self.register(CapabilityDef {
            name: "standardize",
            category: Category::Transform,
            min_args: 1,
            max_args: Some(1),
            implementation: transform::fn_standardize,
        });
        self.register(CapabilityDef {
            name: "scale",
            category: Category::Transform,
            min_args: 1,
            max_args: Some(2),
            implementation: transform::fn_scale,
        });
        self.register(CapabilityDef {
            name: "log_transform",
            category: Category::Transform,
            min_args: 1,
            max_args: Some(1),
            implementation: transform::fn_log_transform,
        });
        self.register(CapabilityDef {
            name: "power_transform",
            category: Category::Transform,
            min_args: 1,
            max_args: Some(2),
            implementation: transform::fn_power_transform,
        });
    }

    fn register_filter(&mut self) {
        self.register(CapabilityDef {
            name: "moving_average",
            category: Category::Filter,
            min_args: 1,
            max_args: Some(2),
            implementation: filter::fn_moving_average,
        });
        self.register(CapabilityDef {
            name: "gaussian_filter",
            category: Category::Filter,
            min_args: 1,
            max_args: Some(2),
            implementation: filter::fn_gaussian_filter,
        });
        self.register(CapabilityDef {
            name: "median_filter",
            category: Category::Filter,
            min_args: 1,
            max_args: Some(2),
            implementation: filter::fn_median_filter,
        });
        self.register(CapabilityDef {
            name: "rolling_sum",
            category: Category::Filter,
            min_args: 1,
            max_args: Some(2),
            implementation: filter::fn_rolling_sum,
        });
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<CapabilityRegistry> = Lazy::new(CapabilityRegistry::new);

/// The process-wide capability registry
pub fn capabilities() -> &'static CapabilityRegistry {
    &REGISTRY
}
