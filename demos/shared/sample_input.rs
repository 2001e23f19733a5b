use rv_report_pdf::model::{ChecklistItem, Priority, ReportInput};

/// Builds a representative analysis result for a remote-work boondocking
/// buyer, covering every section the report renders.
pub fn build_sample_input() -> ReportInput {
    ReportInput::new(
        "Your answers point toward extended off-grid stays with a full-time remote \
         work setup. That profile rewards rigs with strong electrical bones over \
         ones with flashy interiors. Reliable connectivity is the difference between \
         a workday and a lost client, so treat it as infrastructure rather than an \
         accessory. Plan your walkthroughs around the systems below before falling \
         in love with a floor plan.",
        "Aftermarket power and connectivity upgrades routinely add several thousand \
         dollars on top of the sticker price. Set aside a first-year reserve for \
         tires, bearings, and the surprises every used coach hides. Dealer financing \
         rarely rolls in aftermarket equipment, so price those upgrades in cash. \
         Resale value tracks maintenance records more closely than model year.",
    )
    .with_checklist_items([
        ChecklistItem::new("Power", "Lithium battery bank")
            .with_priority(Priority::Essential)
            .with_questions([
                "What is the usable capacity in amp hours?",
                "Is the battery heater wired to shore power or the inverter?",
                "When were the cells last load tested?",
            ]),
        ChecklistItem::new("Connectivity", "Cellular router with external antenna")
            .with_priority(Priority::Essential)
            .with_questions([
                "Which carriers does the modem support?",
                "Where does the antenna cable enter the roof?",
            ]),
        ChecklistItem::new("Power", "Inverter sizing")
            .with_priority(Priority::Essential)
            .with_question("Can the inverter run the air conditioner with soft start?"),
        ChecklistItem::new("Power", "Roof solar prewire")
            .with_priority(Priority::Important)
            .with_questions([
                "What gauge is the prewired cable run?",
                "Is there a charge controller installed or just the wiring?",
            ]),
        ChecklistItem::new("Monitoring", "Tank and battery telemetry")
            .with_priority(Priority::Important)
            .with_question("Do the tank sensors report to a phone app or only the panel?"),
        ChecklistItem::new("Comfort", "Smart thermostat").with_priority(Priority::NiceToHave),
        ChecklistItem::new("Comfort", "Exterior entertainment hookups")
            .with_priority(Priority::NiceToHave)
            .with_question("Is the exterior TV mount wired through the inverter?"),
    ])
    .with_dealer_questions([
        "Is the warranty transferable to a second owner?",
        "Which service items are covered during the first year?",
        "Can the solar prewire handle a 400W array without rewiring?",
        "What is the turnaround time for warranty work at this location?",
        "Are maintenance records available for the chassis and generator?",
    ])
}
