use std::{fmt, num::NonZeroUsize, path::Path, sync::LazyLock};

use anyhow::Context;
use dialoguer::{Confirm, Input, Select};
use regex::Regex;
use relief::{
    Config, DietaryCode, EventDate, Inquirer, InquiryLog, Location, LocationId, Registry, SocialId,
    Supply, SupplyKind, Victim,
};
use tracing::{debug, instrument};

use super::terminal::{self, Colorize};

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("hard-coded pattern is valid"));

/// Command arguments for `relief run`.
#[derive(Debug, Default, clap::Parser)]
#[command(about = "Run an interactive registry session")]
pub struct Run {
    /// Workstation mode to start in (default: central).
    #[arg(long, value_enum, default_value_t)]
    mode: Mode,
}

/// Workstation modes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum Mode {
    /// Central desk with access to every location.
    #[default]
    Central,
    /// Single-site desk, scoped to one location.
    Location,
}

impl Run {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Path, db: &Path) -> anyhow::Result<()> {
        let config = load_config(config)?;
        let store = InquiryLog::open(db)
            .with_context(|| format!("failed to open the inquiry log at {}", db.display()))?;

        let mut session = Session {
            registry: Registry::new(config),
            store,
        };
        session.run(self.mode)
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Config::load(path).map_err(|e| anyhow::anyhow!(e))
    } else {
        debug!(
            "no config file at {}; using the default gender vocabulary",
            path.display()
        );
        Ok(Config::default())
    }
}

/// One interactive session: a registry plus the persistent inquiry log.
struct Session {
    registry: Registry,
    store: InquiryLog,
}

/// Where the menu loop goes next.
enum Flow {
    Central,
    Location(LocationId),
    Exit,
}

impl Session {
    fn run(&mut self, mode: Mode) -> anyhow::Result<()> {
        println!("{}", "Disaster relief registry".heading());

        let mut flow = match mode {
            Mode::Central => Flow::Central,
            Mode::Location => self.choose_location_flow()?,
        };

        loop {
            flow = match flow {
                Flow::Central => self.central_menu()?,
                Flow::Location(id) => self.location_menu(id)?,
                Flow::Exit => break,
            };
        }

        println!("{}", "Session closed.".dim());
        Ok(())
    }

    fn central_menu(&mut self) -> anyhow::Result<Flow> {
        println!();
        println!("{}", "Central desk".heading());

        let items = [
            "Enter or update victim information",
            "Log an inquirer call",
            "Add a location",
            "Display all locations and victims",
            "Add supplies to a location",
            "Display supplies at a location",
            "Stored inquirer log",
            "Inquiries logged this session",
            "Switch to a location desk",
            "Exit",
        ];

        let picked = Select::new()
            .with_prompt("Choose an option")
            .items(&items)
            .default(0)
            .interact()?;

        match picked {
            0 => self.victim_workflow(None)?,
            1 => self.inquiry_workflow()?,
            2 => {
                self.add_location()?;
            }
            3 => self.display_locations(),
            4 => self.add_supplies_workflow()?,
            5 => self.display_supplies_workflow()?,
            6 => super::inquiries::print_table(&self.store)?,
            7 => self.print_session_inquiries(),
            8 => return self.choose_location_flow(),
            9 => {
                if Confirm::new()
                    .with_prompt("Exit the session?")
                    .default(false)
                    .interact()?
                {
                    return Ok(Flow::Exit);
                }
            }
            _ => unreachable!("menu index out of range"),
        }

        Ok(Flow::Central)
    }

    fn location_menu(&mut self, id: LocationId) -> anyhow::Result<Flow> {
        let name = self.registry.location(id)?.name().to_string();
        println!();
        println!("{}", format!("Location desk: {name}").heading());

        let items = [
            "Enter or update victim information here",
            "Display victims at this location",
            "Display supplies here",
            "Add supplies here",
            "Switch to the central desk",
            "Exit",
        ];

        let picked = Select::new()
            .with_prompt("Choose an option")
            .items(&items)
            .default(0)
            .interact()?;

        match picked {
            0 => self.victim_workflow(Some(id))?,
            1 => self.display_site_victims(id)?,
            2 => self.display_supplies(id)?,
            3 => self.add_supplies(id)?,
            4 => return Ok(Flow::Central),
            5 => {
                if Confirm::new()
                    .with_prompt("Exit the session?")
                    .default(false)
                    .interact()?
                {
                    return Ok(Flow::Exit);
                }
            }
            _ => unreachable!("menu index out of range"),
        }

        Ok(Flow::Location(id))
    }

    /// Pick a location to work at, offering to create the first one.
    fn choose_location_flow(&mut self) -> anyhow::Result<Flow> {
        if self.registry.locations().next().is_none() {
            println!("{}", "⚠️  No locations registered yet.".warning());
            if Confirm::new()
                .with_prompt("Add one now?")
                .default(true)
                .interact()?
            {
                let id = self.add_location()?;
                return Ok(Flow::Location(id));
            }
            return Ok(Flow::Central);
        }

        let id = self.select_location("Work at which location?")?;
        Ok(Flow::Location(id))
    }

    fn select_location(&self, prompt: &str) -> anyhow::Result<LocationId> {
        let locations: Vec<&Location> = self.registry.locations().collect();
        let labels: Vec<String> = locations.iter().map(|site| location_label(site)).collect();

        let picked = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(locations[picked].id())
    }

    fn add_location(&mut self) -> anyhow::Result<LocationId> {
        let name: String = Input::new().with_prompt("Location name").interact_text()?;
        let address: String = Input::new().with_prompt("Address").interact_text()?;

        let id = self.registry.add_location(name, address);
        println!("{}", format!("✅ Registered location #{id}").success());
        Ok(id)
    }

    // ---- victim intake and editing ----

    fn victim_workflow(&mut self, site: Option<LocationId>) -> anyhow::Result<()> {
        let items = ["Admit a new victim", "Update an existing record", "Back"];
        let picked = Select::new()
            .with_prompt("Victim records")
            .items(&items)
            .default(0)
            .interact()?;

        match picked {
            0 => self.admit_victim(site),
            1 => self.edit_victim(site),
            _ => Ok(()),
        }
    }

    fn admit_victim(&mut self, site: Option<LocationId>) -> anyhow::Result<()> {
        let first_name: String = Input::new().with_prompt("First name").interact_text()?;
        let entry_date: String = Input::new()
            .with_prompt("Entry date (YYYY-MM-DD)")
            .validate_with(validate_recent_date)
            .interact_text()?;

        let location = match site {
            Some(id) => Some(id),
            None => {
                if self.registry.locations().next().is_some()
                    && Confirm::new()
                        .with_prompt("Assign to a location now?")
                        .default(true)
                        .interact()?
                {
                    Some(self.select_location("Which location?")?)
                } else {
                    None
                }
            }
        };

        match self.registry.admit_victim(&first_name, &entry_date, location) {
            Ok(id) => {
                println!("{}", format!("✅ Registered {first_name} as #{id}").success());
                if Confirm::new()
                    .with_prompt("Fill in the rest of the record now?")
                    .default(true)
                    .interact()?
                {
                    self.edit_victim_fields(id)?;
                }
            }
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn edit_victim(&mut self, site: Option<LocationId>) -> anyhow::Result<()> {
        let Some(id) = self.find_victim(site)? else {
            return Ok(());
        };
        self.edit_victim_fields(id)
    }

    /// Search the registry by name and pick one record.
    ///
    /// Unlike the inquiry search this covers unhoused victims too, so a
    /// record admitted without a location can still be edited.
    fn find_victim(&self, site: Option<LocationId>) -> anyhow::Result<Option<SocialId>> {
        let query: String = Input::new()
            .with_prompt("Search by name (empty lists everyone)")
            .allow_empty(true)
            .interact_text()?;

        let matches: Vec<&Victim> = self
            .registry
            .victims()
            .filter(|victim| victim.matches_name(&query))
            .filter(|victim| site.is_none() || victim.location() == site)
            .collect();

        if matches.is_empty() {
            println!("{}", "⚠️  No registered victim matches that name.".warning());
            return Ok(None);
        }

        let labels: Vec<String> = matches
            .iter()
            .map(|victim| victim_label(&self.registry, victim))
            .collect();
        let picked = Select::new()
            .with_prompt("Which person?")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(Some(matches[picked].social_id()))
    }

    fn edit_victim_fields(&mut self, id: SocialId) -> anyhow::Result<()> {
        loop {
            let name = full_name(self.registry.victim(id)?);
            println!();
            println!("{}", format!("Editing #{id} {name}").heading());

            let items = [
                "Show full record",
                "First name",
                "Last name",
                "Date of birth",
                "Approximate age",
                "Gender",
                "Comments",
                "Add a dietary restriction",
                "Remove a dietary restriction",
                "Issue a belonging from site stock",
                "Remove a belonging",
                "Add a family connection",
                "Remove a family connection",
                "Add a medical record",
                "Move to another location",
                "Done",
            ];

            let picked = Select::new()
                .with_prompt("Which detail?")
                .items(&items)
                .default(0)
                .interact()?;

            match picked {
                0 => self.show_victim(id)?,
                1 => self.edit_first_name(id)?,
                2 => self.edit_last_name(id)?,
                3 => self.edit_birth_date(id)?,
                4 => self.edit_age(id)?,
                5 => self.edit_gender(id)?,
                6 => self.edit_comments(id)?,
                7 => self.add_dietary(id)?,
                8 => self.remove_dietary(id)?,
                9 => self.issue_belonging(id)?,
                10 => self.remove_belonging(id)?,
                11 => self.add_family(id)?,
                12 => self.remove_family(id)?,
                13 => self.add_medical(id)?,
                14 => self.move_victim(id)?,
                _ => return Ok(()),
            }
        }
    }

    fn edit_first_name(&mut self, id: SocialId) -> anyhow::Result<()> {
        let value: String = Input::new().with_prompt("First name").interact_text()?;
        self.registry.victim_mut(id)?.set_first_name(value);
        Ok(())
    }

    fn edit_last_name(&mut self, id: SocialId) -> anyhow::Result<()> {
        let value: String = Input::new()
            .with_prompt("Last name (empty keeps the current value)")
            .allow_empty(true)
            .interact_text()?;

        if !value.is_empty() {
            self.registry.victim_mut(id)?.set_last_name(value);
        }
        Ok(())
    }

    fn edit_birth_date(&mut self, id: SocialId) -> anyhow::Result<()> {
        let value: String = Input::new()
            .with_prompt("Date of birth (YYYY-MM-DD)")
            .validate_with(validate_date)
            .interact_text()?;

        if let Err(e) = self.registry.victim_mut(id)?.set_date_of_birth(&value) {
            report(&e);
        }
        Ok(())
    }

    fn edit_age(&mut self, id: SocialId) -> anyhow::Result<()> {
        let age: u32 = Input::new()
            .with_prompt("Approximate age")
            .interact_text()?;

        if let Err(e) = self.registry.victim_mut(id)?.set_approximate_age(age) {
            report(&e);
        }
        Ok(())
    }

    fn edit_gender(&mut self, id: SocialId) -> anyhow::Result<()> {
        let genders: Vec<String> = self.registry.config().genders().to_vec();
        let picked = Select::new()
            .with_prompt("Gender")
            .items(&genders)
            .default(0)
            .interact()?;

        if let Err(e) = self.registry.set_gender(id, &genders[picked]) {
            report(&e);
        }
        Ok(())
    }

    fn edit_comments(&mut self, id: SocialId) -> anyhow::Result<()> {
        let value: String = Input::new()
            .with_prompt("Comments (empty keeps the current value)")
            .allow_empty(true)
            .interact_text()?;

        if !value.is_empty() {
            self.registry.victim_mut(id)?.set_comments(value);
        }
        Ok(())
    }

    fn add_dietary(&mut self, id: SocialId) -> anyhow::Result<()> {
        let labels: Vec<String> = DietaryCode::ALL
            .iter()
            .map(|code| format!("{code}  {}", code.description()))
            .collect();

        let picked = Select::new()
            .with_prompt("Dietary restriction")
            .items(&labels)
            .default(0)
            .interact()?;

        if !self
            .registry
            .victim_mut(id)?
            .add_dietary_restriction(DietaryCode::ALL[picked])
        {
            println!("{}", "Already recorded for this person.".dim());
        }
        Ok(())
    }

    fn remove_dietary(&mut self, id: SocialId) -> anyhow::Result<()> {
        let current: Vec<DietaryCode> = self
            .registry
            .victim(id)?
            .dietary_restrictions()
            .iter()
            .copied()
            .collect();

        if current.is_empty() {
            println!("{}", "No dietary restrictions recorded.".dim());
            return Ok(());
        }

        let labels: Vec<String> = current
            .iter()
            .map(|code| format!("{code}  {}", code.description()))
            .collect();
        let picked = Select::new()
            .with_prompt("Remove which restriction?")
            .items(&labels)
            .default(0)
            .interact()?;

        if !self
            .registry
            .victim_mut(id)?
            .remove_dietary_restriction(current[picked])
        {
            println!("{}", "Not on their record.".dim());
        }
        Ok(())
    }

    fn issue_belonging(&mut self, id: SocialId) -> anyhow::Result<()> {
        let Some(site_id) = self.registry.victim(id)?.location() else {
            println!(
                "{}",
                "⚠️  Assign a location first; belongings are issued from site stock.".warning()
            );
            return Ok(());
        };

        let stock: Vec<Supply> = self.registry.location(site_id)?.supplies().to_vec();
        if stock.is_empty() {
            println!("{}", "Nothing stocked at this location.".dim());
            return Ok(());
        }

        let labels: Vec<String> = stock
            .iter()
            .map(|supply| format!("{} ({} in stock)", supply.kind(), supply.quantity()))
            .collect();
        let picked = Select::new()
            .with_prompt("Issue which supply?")
            .items(&labels)
            .default(0)
            .interact()?;

        let quantity: u32 = Input::new()
            .with_prompt("Quantity")
            .validate_with(validate_quantity)
            .interact_text()?;

        let supply = Supply::from_parts(stock[picked].kind().clone(), quantity);
        match self.registry.issue_belonging(id, supply) {
            Ok(()) => println!("{}", "✅ Issued.".success()),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn remove_belonging(&mut self, id: SocialId) -> anyhow::Result<()> {
        // Belongings are issued in batches, so the same kind can appear more
        // than once; offer the distinct kinds with their totals.
        let mut totals: Vec<(SupplyKind, u32)> = Vec::new();
        for supply in self.registry.victim(id)?.belongings() {
            match totals.iter_mut().find(|(kind, _)| kind == supply.kind()) {
                Some((_, total)) => *total += supply.quantity(),
                None => totals.push((supply.kind().clone(), supply.quantity())),
            }
        }

        if totals.is_empty() {
            println!("{}", "No belongings recorded.".dim());
            return Ok(());
        }

        let labels: Vec<String> = totals
            .iter()
            .map(|(kind, total)| format!("{kind} ({total} held)"))
            .collect();
        let picked = Select::new()
            .with_prompt("Remove which belonging?")
            .items(&labels)
            .default(0)
            .interact()?;

        let quantity: u32 = Input::new()
            .with_prompt("Quantity")
            .validate_with(validate_quantity)
            .interact_text()?;

        let removed = self
            .registry
            .victim_mut(id)?
            .remove_belonging(&totals[picked].0, quantity);
        println!("{}", format!("Removed {removed}.").dim());
        Ok(())
    }

    fn add_family(&mut self, id: SocialId) -> anyhow::Result<()> {
        let raw: usize = Input::new()
            .with_prompt("Other person's social ID")
            .validate_with(validate_social_id)
            .interact_text()?;

        let Some(other) = NonZeroUsize::new(raw).map(SocialId::new) else {
            println!("{}", "⚠️  Social IDs start at 1.".warning());
            return Ok(());
        };

        let label: String = Input::new()
            .with_prompt("Relationship (e.g. parent, sibling)")
            .interact_text()?;

        match self.registry.relate(id, &label, other) {
            Ok(true) => println!("{}", "✅ Recorded on both records.".success()),
            Ok(false) => println!("{}", "Already recorded.".dim()),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn remove_family(&mut self, id: SocialId) -> anyhow::Result<()> {
        let connections: Vec<(String, SocialId)> = self
            .registry
            .victim(id)?
            .family_connections()
            .iter()
            .filter_map(|relation| {
                relation
                    .other(id)
                    .map(|other| (relation.label().to_string(), other))
            })
            .collect();

        if connections.is_empty() {
            println!("{}", "No family connections recorded.".dim());
            return Ok(());
        }

        let labels: Vec<String> = connections
            .iter()
            .map(|(label, other)| {
                let name = self
                    .registry
                    .victim(*other)
                    .map_or_else(|_| format!("#{other}"), full_name);
                format!("{label}: {name} (#{other})")
            })
            .collect();
        let picked = Select::new()
            .with_prompt("Remove which connection?")
            .items(&labels)
            .default(0)
            .interact()?;

        let (label, other) = &connections[picked];
        match self.registry.unrelate(id, label, *other) {
            Ok(true) => println!("{}", "Removed from both records.".dim()),
            Ok(false) => println!("{}", "No such connection.".dim()),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn add_medical(&mut self, id: SocialId) -> anyhow::Result<()> {
        if self.registry.locations().next().is_none() {
            println!(
                "{}",
                "⚠️  Register a location first; treatments are tied to a site.".warning()
            );
            return Ok(());
        }

        let site = self.select_location("Treated at which location?")?;
        let date: String = Input::new()
            .with_prompt("Treatment date (YYYY-MM-DD)")
            .validate_with(validate_recent_date)
            .interact_text()?;
        let details: String = Input::new()
            .with_prompt("Treatment details")
            .interact_text()?;

        match self.registry.record_treatment(id, site, &details, &date) {
            Ok(()) => println!("{}", "✅ Medical record added.".success()),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn move_victim(&mut self, id: SocialId) -> anyhow::Result<()> {
        if self.registry.locations().next().is_none() {
            println!("{}", "⚠️  No locations registered yet.".warning());
            return Ok(());
        }

        let site = self.select_location("Move to which location?")?;
        match self.registry.assign_location(id, site) {
            Ok(()) => println!("{}", "✅ Updated.".success()),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn show_victim(&self, id: SocialId) -> anyhow::Result<()> {
        let victim = self.registry.victim(id)?;

        println!();
        println!("{}", format!("#{id} {}", full_name(victim)).heading());
        println!("  Entry date:    {}", victim.entry_date());
        match (victim.date_of_birth(), victim.approximate_age()) {
            (Some(date), _) => println!("  Date of birth: {date}"),
            (None, Some(age)) => println!("  Age (approx):  {age}"),
            (None, None) => println!("  Age:           {}", "unknown".dim()),
        }
        if let Some(gender) = victim.gender() {
            println!("  Gender:        {gender}");
        }
        match victim
            .location()
            .and_then(|site| self.registry.location(site).ok())
        {
            Some(site) => println!("  Location:      {} ({})", site.name(), site.address()),
            None => println!("  Location:      {}", "none".dim()),
        }
        if let Some(comments) = victim.comments() {
            println!("  Comments:      {comments}");
        }

        if !victim.dietary_restrictions().is_empty() {
            let codes: Vec<String> = victim
                .dietary_restrictions()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("  Dietary:       {}", codes.join(", "));
        }

        if !victim.belongings().is_empty() {
            println!("  Belongings:");
            for supply in victim.belongings() {
                println!("    - {} x{}", supply.kind(), supply.quantity());
            }
        }

        if !victim.family_connections().is_empty() {
            println!("  Family:");
            for relation in victim.family_connections() {
                let Some(other) = relation.other(id) else {
                    continue;
                };
                let name = self
                    .registry
                    .victim(other)
                    .map_or_else(|_| format!("#{other}"), full_name);
                println!("    - {}: {name} (#{other})", relation.label());
            }
        }

        if !victim.medical_records().is_empty() {
            println!("  Medical records:");
            for record in victim.medical_records() {
                let site = self.registry.location(record.location()).map_or_else(
                    |_| format!("#{}", record.location()),
                    |location| location.name().to_string(),
                );
                println!(
                    "    - {}  {} ({site})",
                    record.date_of_treatment(),
                    record.treatment_details()
                );
            }
        }
        Ok(())
    }

    // ---- locations and supplies ----

    fn display_locations(&self) {
        let sites: Vec<&Location> = self.registry.locations().collect();
        if sites.is_empty() {
            println!("{}", "No locations registered.".dim());
            return;
        }

        let narrow = terminal::is_narrow();
        let headers: &[&str] = if narrow {
            &["ID", "Name", "Victims"]
        } else {
            &["ID", "Name", "Address", "Victims"]
        };

        let data: Vec<Vec<String>> = sites
            .iter()
            .map(|site| {
                let occupants = site
                    .occupants()
                    .iter()
                    .map(|&occupant| {
                        self.registry.victim(occupant).map_or_else(
                            |_| format!("#{occupant}"),
                            |victim| format!("{} (#{occupant})", full_name(victim)),
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");

                let mut row = vec![site.id().to_string(), site.name().to_string()];
                if !narrow {
                    row.push(site.address().to_string());
                }
                row.push(occupants);
                row
            })
            .collect();

        // Determine column widths for alignment.
        let widths = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                data.iter()
                    .map(|row| row[idx].len())
                    .max()
                    .unwrap_or(0)
                    .max(header.len())
            })
            .collect::<Vec<_>>();

        for (header, width) in headers.iter().zip(&widths) {
            print!("{header:<width$}  ");
        }
        println!();
        for width in &widths {
            print!("{:-<width$}  ", "");
        }
        println!();

        for row in &data {
            for (value, width) in row.iter().zip(&widths) {
                print!("{value:<width$}  ");
            }
            println!();
        }
    }

    fn display_site_victims(&self, id: LocationId) -> anyhow::Result<()> {
        let site = self.registry.location(id)?;
        if site.occupants().is_empty() {
            println!("{}", "No victims registered here.".dim());
            return Ok(());
        }

        for &occupant in site.occupants() {
            if let Ok(victim) = self.registry.victim(occupant) {
                println!("  {} (#{occupant})", full_name(victim));
            }
        }
        Ok(())
    }

    fn add_supplies_workflow(&mut self) -> anyhow::Result<()> {
        if self.registry.locations().next().is_none() {
            println!("{}", "⚠️  No locations registered yet.".warning());
            return Ok(());
        }

        let id = self.select_location("Stock which location?")?;
        self.add_supplies(id)
    }

    fn add_supplies(&mut self, id: LocationId) -> anyhow::Result<()> {
        let kind: String = Input::new().with_prompt("Supply type").interact_text()?;
        let quantity: u32 = Input::new()
            .with_prompt("Quantity")
            .validate_with(validate_quantity)
            .interact_text()?;

        match Supply::new(&kind, i64::from(quantity)) {
            Ok(supply) => {
                self.registry.location_mut(id)?.add_supply(supply);
                println!("{}", "✅ Stock updated.".success());
            }
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn display_supplies_workflow(&self) -> anyhow::Result<()> {
        if self.registry.locations().next().is_none() {
            println!("{}", "No locations registered.".dim());
            return Ok(());
        }

        let id = self.select_location("Supplies at which location?")?;
        self.display_supplies(id)
    }

    fn display_supplies(&self, id: LocationId) -> anyhow::Result<()> {
        let site = self.registry.location(id)?;
        if site.supplies().is_empty() {
            println!("{}", "Nothing stocked at this location.".dim());
            return Ok(());
        }

        for supply in site.supplies() {
            println!("  {} x{}", supply.kind(), supply.quantity());
        }
        Ok(())
    }

    // ---- inquiries ----

    fn inquiry_workflow(&mut self) -> anyhow::Result<()> {
        println!("{}", "Inquirer call".heading());

        let first_name: String = Input::new()
            .with_prompt("Caller first name")
            .interact_text()?;
        let last_name: String = Input::new()
            .with_prompt("Caller last name (optional)")
            .allow_empty(true)
            .interact_text()?;
        let phone: String = Input::new()
            .with_prompt("Phone number")
            .validate_with(validate_phone)
            .interact_text()?;

        let inquirer = Inquirer::new(&first_name, &last_name, &phone);
        if self.registry.inquirer_exists(&inquirer) {
            println!("{}", "Caller already known to the registry.".info());
        }
        let inquirer_id = self.registry.register_inquirer(inquirer);

        let query: String = Input::new()
            .with_prompt("Missing person's name")
            .interact_text()?;

        let candidates: Vec<(SocialId, String)> = self
            .registry
            .search_victims(&query)
            .into_iter()
            .map(|victim| (victim.social_id(), victim_label(&self.registry, victim)))
            .collect();

        if candidates.is_empty() {
            println!(
                "{}",
                "⚠️  Nobody matching that name is registered at any location.".warning()
            );
            return Ok(());
        }

        let labels: Vec<&str> = candidates.iter().map(|(_, label)| label.as_str()).collect();
        let picked = Select::new()
            .with_prompt("Which person is the call about?")
            .items(&labels)
            .default(0)
            .interact()?;
        let missing = candidates[picked].0;

        let date: String = Input::new()
            .with_prompt("Call date (YYYY-MM-DD)")
            .validate_with(validate_date)
            .interact_text()?;
        let info: String = Input::new()
            .with_prompt("Notes from the call")
            .interact_text()?;

        let Some(last_known) = self.registry.victim(missing)?.location() else {
            println!(
                "{}",
                "⚠️  That person is not currently housed at any location.".warning()
            );
            return Ok(());
        };

        match self
            .registry
            .log_inquiry(inquirer_id, missing, &date, &info, last_known)
        {
            Ok(()) => println!("{}", "✅ Inquiry recorded.".success()),
            Err(e) => {
                report(&e);
                return Ok(());
            }
        }

        let last_opt = (!last_name.is_empty()).then_some(last_name.as_str());
        self.store
            .record(&first_name, last_opt, &phone, &date, &info)
            .context("failed to persist the inquiry")?;
        println!("{}", "Saved to the inquiry log.".dim());
        Ok(())
    }

    fn print_session_inquiries(&self) {
        let records = self.registry.inquiries();
        if records.is_empty() {
            println!("{}", "No inquiries logged this session.".dim());
            return;
        }

        for record in records {
            let caller = self
                .registry
                .inquirer(record.inquirer())
                .map_or_else(|_| format!("#{}", record.inquirer()), inquirer_name);
            let missing = self
                .registry
                .victim(record.missing_person())
                .map_or_else(|_| format!("#{}", record.missing_person()), full_name);
            let site = self
                .registry
                .location(record.last_known_location())
                .map_or_else(
                    |_| format!("#{}", record.last_known_location()),
                    |location| location.name().to_string(),
                );

            println!(
                "  {}  {caller} asked after {missing} (last known: {site})",
                record.date_of_inquiry()
            );
            println!("    {}", record.info_provided().dim());
        }
    }
}

fn report(error: &impl fmt::Display) {
    println!("{}", format!("⚠️  {error}").warning());
}

fn full_name(victim: &Victim) -> String {
    match victim.last_name() {
        Some(last) => format!("{} {last}", victim.first_name()),
        None => victim.first_name().to_string(),
    }
}

fn inquirer_name(asker: &Inquirer) -> String {
    if asker.last_name().is_empty() {
        asker.first_name().to_string()
    } else {
        format!("{} {}", asker.first_name(), asker.last_name())
    }
}

fn victim_label(registry: &Registry, victim: &Victim) -> String {
    let name = full_name(victim);
    let id = victim.social_id();
    match victim
        .location()
        .and_then(|site| registry.location(site).ok())
    {
        Some(site) => format!("#{id} {name} @ {}", site.name()),
        None => format!("#{id} {name} (no location)"),
    }
}

fn location_label(site: &Location) -> String {
    format!("#{} {} ({})", site.id(), site.name(), site.address())
}

fn validate_date(input: &String) -> Result<(), String> {
    EventDate::parse(input).map(|_| ()).map_err(|e| e.to_string())
}

fn validate_recent_date(input: &String) -> Result<(), String> {
    EventDate::parse_in_window(input)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn validate_phone(input: &String) -> Result<(), String> {
    if PHONE_SHAPE.is_match(input) {
        Ok(())
    } else {
        Err("phone numbers look like 555-123-4567".to_string())
    }
}

fn validate_quantity(value: &u32) -> Result<(), String> {
    if *value == 0 {
        Err("enter a quantity of at least 1".to_string())
    } else {
        Ok(())
    }
}

fn validate_social_id(value: &usize) -> Result<(), String> {
    if *value == 0 {
        Err("social IDs start at 1".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    fn today() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn seeded_registry() -> (Registry, SocialId, LocationId) {
        let mut registry = Registry::new(Config::default());
        let site = registry.add_location("Riverside Shelter", "12 Bank St");
        let victim = registry
            .admit_victim("Priya", &today(), Some(site))
            .unwrap();
        (registry, victim, site)
    }

    #[test]
    fn victim_labels_show_id_name_and_location() {
        let (mut registry, id, _) = seeded_registry();
        registry.victim_mut(id).unwrap().set_last_name("Sharma");

        let label = victim_label(&registry, registry.victim(id).unwrap());
        assert_eq!(label, format!("#{id} Priya Sharma @ Riverside Shelter"));
    }

    #[test]
    fn unhoused_victims_are_labelled_as_such() {
        let mut registry = Registry::new(Config::default());
        let id = registry.admit_victim("Omar", &today(), None).unwrap();

        let label = victim_label(&registry, registry.victim(id).unwrap());
        assert_eq!(label, format!("#{id} Omar (no location)"));
    }

    #[test]
    fn full_name_omits_a_missing_last_name() {
        let (registry, id, _) = seeded_registry();
        assert_eq!(full_name(registry.victim(id).unwrap()), "Priya");
    }

    #[test]
    fn location_labels_include_the_address() {
        let (registry, _, site) = seeded_registry();
        let label = location_label(registry.location(site).unwrap());
        assert_eq!(label, format!("#{site} Riverside Shelter (12 Bank St)"));
    }

    #[test]
    fn quantity_validator_rejects_zero() {
        assert!(validate_quantity(&0).is_err());
        assert!(validate_quantity(&3).is_ok());
    }

    #[test]
    fn phone_validator_expects_dashed_digits() {
        assert!(validate_phone(&"555-123-4567".to_string()).is_ok());
        assert!(validate_phone(&"5551234567".to_string()).is_err());
        assert!(validate_phone(&"call me".to_string()).is_err());
    }

    #[test]
    fn date_validators_distinguish_window_from_shape() {
        assert!(validate_date(&"1950-06-15".to_string()).is_ok());
        assert!(validate_recent_date(&"1950-06-15".to_string()).is_err());
        assert!(validate_recent_date(&today()).is_ok());
    }
}
