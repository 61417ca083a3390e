//! The platform descriptor: a board bound to a device variant and toolchain.

use crate::error::PlatformError;
use crate::policy::default_constraints;
use crate::variant::{Toolchain, VariantSpec};
use pinout_catalog::{Lookup, Resource, ResourceCatalog, ResourceId};
use pinout_common::{ContentHash, ContentHasher};
use pinout_pins::ConnectorRegistry;

/// The board's main oscillator.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultClock {
    /// The resource name, e.g. `clk100`.
    pub name: &'static str,
    /// The oscillator period in nanoseconds.
    pub period_ns: f64,
}

/// Everything a board defines, independent of the variant chosen.
#[derive(Debug, Clone)]
pub struct BoardDescription {
    /// The board name.
    pub name: &'static str,
    /// The closed set of variants.
    pub variants: &'static [VariantSpec],
    /// The variant key used when a build does not name one.
    pub default_variant: &'static str,
    /// The board connectors.
    pub connectors: ConnectorRegistry,
    /// The board resources, resolved against `connectors`.
    pub catalog: ResourceCatalog,
    /// The default clock.
    pub default_clock: DefaultClock,
    /// Raw toolchain commands every design on this board needs.
    pub platform_commands: Vec<String>,
}

/// A period constraint on a clock input.
///
/// `resource` always names the single one-bit signal carrying the clock, so
/// `eth_clocks[0]` is recorded as `eth_clocks[0].ref_clk`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodConstraint {
    /// The constrained signal.
    pub resource: ResourceId,
    /// The package pin of the clock input.
    pub pin: String,
    /// The clock period in nanoseconds.
    pub period_ns: f64,
}

/// Two ids overlap when they name the same resource and either one is the
/// whole resource or both name the same sub-signal.
fn overlaps(a: &ResourceId, b: &ResourceId) -> bool {
    a.name == b.name
        && a.index == b.index
        && (a.sub_signal.is_none() || b.sub_signal.is_none() || a.sub_signal == b.sub_signal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Finalized,
}

/// A board description bound to one variant and toolchain.
///
/// Constructed once per build. While open, resources can be requested and
/// constraints and commands appended; after [`finalize`](Self::finalize)
/// every mutation fails with [`PlatformError::PlatformFinalized`] while
/// lookups keep working.
#[derive(Debug, Clone)]
pub struct Platform {
    board: &'static str,
    variant: VariantSpec,
    toolchain: Toolchain,
    connectors: ConnectorRegistry,
    catalog: ResourceCatalog,
    default_clock: DefaultClock,
    period_constraints: Vec<PeriodConstraint>,
    platform_commands: Vec<String>,
    requests: Vec<ResourceId>,
    phase: Phase,
}

impl Platform {
    /// Binds a board to the variant and toolchain selected by key.
    pub fn construct(
        board: BoardDescription,
        variant: &str,
        toolchain: &str,
    ) -> Result<Self, PlatformError> {
        let variant = *VariantSpec::select(board.variants, variant)?;
        let toolchain: Toolchain = toolchain.parse()?;
        Ok(Self {
            board: board.name,
            variant,
            toolchain,
            connectors: board.connectors,
            catalog: board.catalog,
            default_clock: board.default_clock,
            period_constraints: Vec::new(),
            platform_commands: board.platform_commands,
            requests: Vec::new(),
            phase: Phase::Open,
        })
    }

    fn ensure_open(&self) -> Result<(), PlatformError> {
        match self.phase {
            Phase::Open => Ok(()),
            Phase::Finalized => Err(PlatformError::PlatformFinalized),
        }
    }

    /// Returns the board name.
    pub fn board(&self) -> &str {
        self.board
    }

    /// Returns the device part number of the selected variant.
    pub fn device(&self) -> &str {
        self.variant.device
    }

    /// Returns the selected variant.
    pub fn variant(&self) -> &VariantSpec {
        &self.variant
    }

    /// Returns the selected toolchain.
    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    /// Returns the resource catalog.
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Returns the connector registry.
    pub fn connectors(&self) -> &ConnectorRegistry {
        &self.connectors
    }

    /// Returns the default clock.
    pub fn default_clock(&self) -> &DefaultClock {
        &self.default_clock
    }

    /// Returns `true` once [`finalize`](Self::finalize) has succeeded.
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    /// Looks up a resource or `name:sub_signal` path in the catalog.
    pub fn lookup_request(
        &self,
        path: &str,
        index: u32,
        loose: bool,
    ) -> Result<Lookup<'_>, PlatformError> {
        Ok(self.catalog.lookup(path, index, loose)?)
    }

    /// Adds resources to the catalog, e.g. from a PMOD template.
    pub fn add_extension(
        &mut self,
        resources: impl IntoIterator<Item = Resource>,
    ) -> Result<(), PlatformError> {
        self.ensure_open()?;
        Ok(self.catalog.extend(resources, &self.connectors)?)
    }

    /// Marks a resource as used by the design and returns its id.
    ///
    /// Requested resources are the ones constraint emission writes out. A
    /// resource overlapping an earlier request (the same one, its enclosing
    /// resource, or one of its sub-signals) fails with
    /// [`PlatformError::ResourceAlreadyRequested`].
    pub fn request(&mut self, path: &str, index: u32) -> Result<ResourceId, PlatformError> {
        self.ensure_open()?;
        let id = self.catalog.lookup(path, index, false)?.id();
        if self.requests.iter().any(|r| overlaps(r, &id)) {
            return Err(PlatformError::ResourceAlreadyRequested(id));
        }
        self.requests.push(id.clone());
        Ok(id)
    }

    /// Returns the requested resources in request order.
    pub fn requests(&self) -> &[ResourceId] {
        &self.requests
    }

    /// Returns `true` if `id`, or the resource enclosing it, was requested.
    pub fn is_requested(&self, id: &ResourceId) -> bool {
        self.requests.iter().any(|r| {
            r == id
                || (r.name == id.name && r.index == id.index && r.sub_signal.is_none())
        })
    }

    /// Builds a period constraint on the clock input `resource` names.
    ///
    /// The lookup must end on exactly one one-bit signal, and the period
    /// must be finite and positive.
    pub(crate) fn period_constraint(
        &self,
        resource: &ResourceId,
        period_ns: f64,
    ) -> Result<PeriodConstraint, PlatformError> {
        let lookup = self.catalog.lookup_id(resource)?;
        let (signal, pin) = match lookup.signals() {
            [signal] if signal.pins.len() == 1 => (signal, &signal.pins[0]),
            signals => {
                return Err(PlatformError::NotAClockPin {
                    resource: resource.clone(),
                    pins: signals.iter().map(|s| s.pins.len()).sum(),
                })
            }
        };
        let resource = match &signal.name {
            Some(sub) => ResourceId::sub_signal(&lookup.resource.name, lookup.resource.index, sub),
            None => lookup.resource.id(),
        };
        if !period_ns.is_finite() || period_ns <= 0.0 {
            return Err(PlatformError::InvalidPeriod {
                resource,
                period_ns,
            });
        }
        Ok(PeriodConstraint {
            resource,
            pin: pin.clone(),
            period_ns,
        })
    }

    /// Returns `true` if the same period is already recorded on the pin, or
    /// fails if a different one is.
    fn check_period(&self, constraint: &PeriodConstraint) -> Result<bool, PlatformError> {
        match self
            .period_constraints
            .iter()
            .find(|c| c.pin == constraint.pin)
        {
            Some(c) if c.period_ns == constraint.period_ns => Ok(true),
            Some(c) => Err(PlatformError::DuplicatePeriodConstraint {
                resource: constraint.resource.clone(),
                existing: c.period_ns,
                requested: constraint.period_ns,
            }),
            None => Ok(false),
        }
    }

    /// Records a period constraint on a clock input.
    ///
    /// A whole resource is accepted when it holds a single one-bit signal;
    /// the constraint is recorded on that signal. Supplying the same period
    /// twice is a no-op; a different period for an already constrained pin
    /// fails with [`PlatformError::DuplicatePeriodConstraint`].
    pub fn add_period_constraint(
        &mut self,
        resource: ResourceId,
        period_ns: f64,
    ) -> Result<(), PlatformError> {
        self.ensure_open()?;
        let constraint = self.period_constraint(&resource, period_ns)?;
        if !self.check_period(&constraint)? {
            self.period_constraints.push(constraint);
        }
        Ok(())
    }

    /// Returns the period constraints in the order they were added.
    pub fn period_constraints(&self) -> &[PeriodConstraint] {
        &self.period_constraints
    }

    /// Appends a raw toolchain command, e.g. an I/O bank property.
    pub fn add_platform_command(&mut self, command: impl Into<String>) -> Result<(), PlatformError> {
        self.ensure_open()?;
        self.platform_commands.push(command.into());
        Ok(())
    }

    /// Returns the raw toolchain commands in order.
    pub fn platform_commands(&self) -> &[String] {
        &self.platform_commands
    }

    /// Adds the default constraints and freezes the platform.
    ///
    /// Fails without changing anything if a default constraint conflicts
    /// with one added earlier, or if the platform is already finalized.
    pub fn finalize(&mut self) -> Result<(), PlatformError> {
        self.ensure_open()?;
        let defaults = default_constraints(self)?;
        for constraint in &defaults {
            self.check_period(constraint)?;
        }
        for constraint in defaults {
            if !self.check_period(&constraint)? {
                self.period_constraints.push(constraint);
            }
        }
        self.phase = Phase::Finalized;
        Ok(())
    }

    /// Hashes everything the build backend consumes from this platform.
    pub fn fingerprint(&self) -> ContentHash {
        let mut hasher = ContentHasher::new();
        hasher
            .field(self.board)
            .field(self.variant.device)
            .field(self.toolchain.key());
        for id in &self.requests {
            hasher.field(&id.to_string());
            if let Ok(lookup) = self.catalog.lookup_id(id) {
                for pin in lookup.pins() {
                    hasher.field(pin);
                }
            }
        }
        for c in &self.period_constraints {
            hasher.field(&c.resource.to_string()).float(c.period_ns);
        }
        for command in &self.platform_commands {
            hasher.field(command);
        }
        hasher.finish()
    }
}
