//! Digilent Nexys A7 (Artix-7 50T / 100T).

use pinout_catalog::{Attribute, CatalogError, Resource, ResourceCatalog, SubSignal};
use pinout_pins::{Connector, ConnectorRegistry};
use pinout_platform::{
    BoardDescription, ConfigFlash, DefaultClock, Platform, PlatformError, VariantSpec,
};

/// Board name used in `pinout.toml`.
pub const NAME: &str = "digilent_nexys_a7";

/// 16 MiB quad-SPI flash (S25FL128S) on both variants.
const FLASH: ConfigFlash = ConfigFlash {
    interface: "spix4",
    size_mib: 16,
    bus_width: 4,
};

/// The closed variant table.
pub const VARIANTS: &[VariantSpec] = &[
    VariantSpec {
        key: "a7-50",
        device: "xc7a50t-1csg324i",
        flash: FLASH,
    },
    VariantSpec {
        key: "a7-100",
        device: "xc7a100tcsg324-1",
        flash: FLASH,
    },
];

/// The 100 MHz board oscillator.
pub const DEFAULT_CLOCK: DefaultClock = DefaultClock {
    name: "clk100",
    period_ns: 10.0,
};

/// PMOD headers JA..JD and the XADC header.
pub const CONNECTORS: &[(&str, &str)] = &[
    ("pmoda", "C17 D18 E18 G17 D17 E17 F18 G18"),
    ("pmodb", "D14 F16 G16 H14 E16 F13 G13 H16"),
    ("pmodc", "K1 F6 J2 G6 E7 J3 J4 E6"),
    ("pmodd", "H4 H1 G1 G3 H2 G4 G2 F3"),
    ("pmodxdac", "A14 A13 A16 A15 B17 B16 A18 B18"),
];

fn lvcmos33() -> Attribute {
    Attribute::io_standard("LVCMOS33")
}

fn sstl18() -> Attribute {
    Attribute::io_standard("SSTL18_II")
}

fn diff_sstl18() -> Attribute {
    Attribute::io_standard("DIFF_SSTL18_II")
}

fn pullup() -> Attribute {
    Attribute::misc("PULLUP True")
}

fn slew_fast() -> Attribute {
    Attribute::misc("SLEW=FAST")
}

fn in_term() -> Attribute {
    Attribute::misc("IN_TERM=UNTUNED_SPLIT_40")
}

/// One single-pin LVCMOS33 resource per pin, indexed from 0.
fn indexed(name: &str, pins: &[&str]) -> Vec<Resource> {
    pins.iter()
        .zip(0..)
        .map(|(pin, i)| Resource::simple(name, i, *pin).with(lvcmos33()))
        .collect()
}

/// The board's on-board I/O.
pub fn io() -> Vec<Resource> {
    let mut io = vec![
        Resource::simple("clk100", 0, "E3").with(lvcmos33()),
        Resource::simple("cpu_reset", 0, "C12").with(lvcmos33()),
    ];

    io.extend(indexed(
        "user_led",
        &[
            "H17", "K15", "J13", "N14", "R18", "V17", "U17", "U16", "V16", "T15", "U14", "T16",
            "V15", "V14", "V12", "V11",
        ],
    ));

    // Seven-segment display; some anode pins carry stray spaces in the
    // vendor master XDC and are kept verbatim.
    io.extend(indexed(
        "segled_an",
        &["J17", "J18", "T9 ", "J14", "P14", "T14", "K2 ", "U13"],
    ));
    for (segment, pin) in [
        ("segled_ca", "T10"),
        ("segled_cb", "R10"),
        ("segled_cc", "K16"),
        ("segled_cd", "K13"),
        ("segled_ce", "P15"),
        ("segled_cf", "T11"),
        ("segled_cg", "L18"),
        ("segled_dp", "H15"),
    ] {
        io.push(Resource::simple(segment, 0, pin).with(lvcmos33()));
    }

    for (i, [r, g, b]) in [["N15", "M16", "R12"], ["N16", "R11", "G14"]]
        .into_iter()
        .enumerate()
    {
        io.push(
            Resource::compound(
                "rgb_led",
                i as u32,
                [
                    SubSignal::new("r", r),
                    SubSignal::new("g", g),
                    SubSignal::new("b", b),
                ],
            )
            .with(lvcmos33()),
        );
    }

    io.extend(indexed(
        "user_sw",
        &[
            "J15", "L16", "M13", "R15", "R17", "T18", "U18", "R13", "T8 ", "U8 ", "R16", "T13",
            "H6 ", "U12", "U11", "V10",
        ],
    ));

    io.extend(indexed("user_btn", &["N17", "M18", "P17", "M17", "P18"]));

    io.push(
        Resource::compound(
            "serial",
            0,
            [SubSignal::new("tx", "D4"), SubSignal::new("rx", "C4")],
        )
        .with(lvcmos33()),
    );

    io.push(
        Resource::compound(
            "spisdcard",
            0,
            [
                SubSignal::new("rst", "E2"),
                SubSignal::new("clk", "B1"),
                SubSignal::new("mosi", "C1").with(pullup()),
                SubSignal::new("cs_n", "D2").with(pullup()),
                SubSignal::new("miso", "C2").with(pullup()),
            ],
        )
        .with(slew_fast())
        .with(lvcmos33()),
    );
    io.push(
        Resource::compound(
            "sdcard",
            0,
            [
                SubSignal::new("rst", "E2").with(pullup()),
                SubSignal::new("data", "C2 E1 F1 D2").with(pullup()),
                SubSignal::new("cmd", "C1").with(pullup()),
                SubSignal::new("clk", "B1"),
                SubSignal::new("cd", "A1"),
            ],
        )
        .with(slew_fast())
        .with(lvcmos33()),
    );

    io.push(
        Resource::compound(
            "cellularram",
            0,
            [
                SubSignal::new(
                    "addr",
                    concat!(
                        "J18 H17 H15 J17 H16 K15 K13 N15 ",
                        "V16 U14 V14 V12 P14 U16 R15 N14 ",
                        "N16 M13 V17 U17 T10 M16 U13"
                    ),
                ),
                SubSignal::new(
                    "data",
                    concat!(
                        "R12 T11 U12 R13 U18 R17 T18 R18 ",
                        "F18 G18 G17 M18 M17 P18 N17 P17"
                    ),
                ),
                SubSignal::new("oen", "H14"),
                SubSignal::new("wen", "R11"),
                SubSignal::new("clk", "T15"),
                SubSignal::new("adv", "T13"),
                SubSignal::new("wait", "T14"),
                SubSignal::new("cen", "L18"),
                SubSignal::new("ub", "J13"),
                SubSignal::new("lb", "J15"),
                SubSignal::new("cre", "J14"),
            ],
        )
        .with(slew_fast())
        .with(lvcmos33()),
    );

    io.push(
        Resource::compound(
            "ddram",
            0,
            [
                SubSignal::new("a", "M4 P4 M6 T1 L3 P5 M2 N1 L4 N5 R2 K5 N6").with(sstl18()),
                SubSignal::new("ba", "P2 P3 R1").with(sstl18()),
                SubSignal::new("ras_n", "N4").with(sstl18()),
                SubSignal::new("cas_n", "L1").with(sstl18()),
                SubSignal::new("we_n", "N2").with(sstl18()),
                SubSignal::new("cs_n", "K6").with(sstl18()),
                SubSignal::new("dm", "U1 T6").with(sstl18()),
                SubSignal::new(
                    "dq",
                    "R7 V6 R8 U7 V7 R6 U6 R5 T5 U3 V5 U4 V4 T4 V1 T3",
                )
                .with(sstl18())
                .with(in_term()),
                SubSignal::new("dqs_p", "U9 U2")
                    .with(diff_sstl18())
                    .with(in_term()),
                SubSignal::new("dqs_n", "V9 V2")
                    .with(diff_sstl18())
                    .with(in_term()),
                SubSignal::new("clk_p", "L6").with(diff_sstl18()),
                SubSignal::new("clk_n", "L5").with(diff_sstl18()),
                SubSignal::new("cke", "M1").with(sstl18()),
                SubSignal::new("odt", "M3").with(sstl18()),
            ],
        )
        .with(slew_fast()),
    );

    // RMII Ethernet
    io.push(
        Resource::compound("eth_clocks", 0, [SubSignal::new("ref_clk", "D5")]).with(lvcmos33()),
    );
    io.push(
        Resource::compound(
            "aud_pwm",
            0,
            [
                SubSignal::new("pwm_out", "A11"),
                SubSignal::new("enable", "D12"),
            ],
        )
        .with(lvcmos33()),
    );
    io.push(
        Resource::compound(
            "eth",
            0,
            [
                SubSignal::new("rst_n", "B3"),
                SubSignal::new("rx_data", "C11 D10"),
                SubSignal::new("crs_dv", "D9"),
                SubSignal::new("tx_en", "B9"),
                SubSignal::new("tx_data", "A10 A8"),
                SubSignal::new("mdc", "C9"),
                SubSignal::new("mdio", "A9"),
                SubSignal::new("rx_er", "C10"),
                SubSignal::new("int_n", "B8"),
            ],
        )
        .with(lvcmos33()),
    );

    io.push(
        Resource::compound(
            "vga",
            0,
            [
                SubSignal::new("hsync_n", "B11"),
                SubSignal::new("vsync_n", "B12"),
                SubSignal::new("r", "A3 B4 C5 A4"),
                SubSignal::new("g", "C6 A5 B6 A6"),
                SubSignal::new("b", "B7 C7 D7 D8"),
            ],
        )
        .with(lvcmos33()),
    );

    io
}

/// Resources of a Digilent PmodMicroSD plugged into `pmod`.
///
/// Pins reference the connector by name and are resolved when the resources
/// are added to a catalog, so the same template fits any PMOD header.
pub fn sdcard_pmod_io(pmod: &str) -> Vec<Resource> {
    vec![
        Resource::compound(
            "spisdcard",
            0,
            [
                SubSignal::new("clk", format!("{pmod}:3")),
                SubSignal::new("mosi", format!("{pmod}:1")).with(pullup()),
                SubSignal::new("cs_n", format!("{pmod}:0")).with(pullup()),
                SubSignal::new("miso", format!("{pmod}:2")).with(pullup()),
            ],
        )
        .with(slew_fast())
        .with(lvcmos33()),
        Resource::compound(
            "sdcard",
            0,
            [
                SubSignal::new("data", format!("{pmod}:2 {pmod}:4 {pmod}:5 {pmod}:0"))
                    .with(pullup()),
                SubSignal::new("cmd", format!("{pmod}:1")).with(pullup()),
                SubSignal::new("clk", format!("{pmod}:3")),
                SubSignal::new("cd", format!("{pmod}:6")),
            ],
        )
        .with(slew_fast())
        .with(lvcmos33()),
    ]
}

/// Builds the connector registry.
pub fn connectors() -> Result<ConnectorRegistry, PlatformError> {
    let mut registry = ConnectorRegistry::new();
    for &(name, pins) in CONNECTORS {
        let connector = Connector::from_pins(name, pins).map_err(CatalogError::from)?;
        registry.add(connector).map_err(CatalogError::from)?;
    }
    Ok(registry)
}

/// Builds the full board description.
pub fn board() -> Result<BoardDescription, PlatformError> {
    let connectors = connectors()?;
    let catalog = ResourceCatalog::from_resources(io(), &connectors)?;
    Ok(BoardDescription {
        name: NAME,
        variants: VARIANTS,
        default_variant: "a7-100",
        connectors,
        catalog,
        default_clock: DEFAULT_CLOCK,
        platform_commands: vec!["set_property INTERNAL_VREF 0.900 [get_iobanks 34]".to_string()],
    })
}

/// Constructs an open platform for a variant and toolchain.
pub fn platform(variant: &str, toolchain: &str) -> Result<Platform, PlatformError> {
    Platform::construct(board()?, variant, toolchain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinout_pins::PinError;

    #[test]
    fn table_resolves() {
        let board = board().unwrap();
        assert_eq!(board.catalog.instance_count("user_led"), 16);
        assert_eq!(board.catalog.instance_count("user_sw"), 16);
        assert_eq!(board.catalog.instance_count("segled_an"), 8);
        assert_eq!(board.catalog.instance_count("user_btn"), 5);
        assert_eq!(board.catalog.instance_count("rgb_led"), 2);
    }

    #[test]
    fn stray_spaces_in_pins_are_trimmed() {
        let board = board().unwrap();
        let an2 = board.catalog.lookup("segled_an", 2, false).unwrap();
        assert_eq!(an2.pins(), vec!["T9"]);
        let sw12 = board.catalog.lookup("user_sw", 12, false).unwrap();
        assert_eq!(sw12.pins(), vec!["H6"]);
    }

    #[test]
    fn ddram_attributes() {
        let board = board().unwrap();
        let dqs = board.catalog.lookup("ddram:dqs_p", 0, false).unwrap();
        let signal = &dqs.signals()[0];
        assert_eq!(signal.attribute("IOSTANDARD"), Some("DIFF_SSTL18_II"));
        assert_eq!(signal.attribute("IN_TERM"), Some("UNTUNED_SPLIT_40"));
        assert_eq!(signal.attribute("SLEW"), Some("FAST"));
        let a = board.catalog.lookup("ddram:a", 0, false).unwrap();
        assert_eq!(a.pins().len(), 13);
    }

    #[test]
    fn cellularram_widths() {
        let board = board().unwrap();
        assert_eq!(board.catalog.lookup("cellularram:addr", 0, false).unwrap().pins().len(), 23);
        assert_eq!(board.catalog.lookup("cellularram:data", 0, false).unwrap().pins().len(), 16);
    }

    #[test]
    fn sdcard_template_on_pmodd() {
        let connectors = connectors().unwrap();
        let catalog = ResourceCatalog::from_resources(sdcard_pmod_io("pmodd"), &connectors).unwrap();
        assert_eq!(catalog.lookup("spisdcard:clk", 0, false).unwrap().pins(), vec!["G3"]);
        assert_eq!(
            catalog.lookup("sdcard:data", 0, false).unwrap().pins(),
            vec!["G1", "H2", "G4", "H4"]
        );
        assert_eq!(catalog.lookup("sdcard:cd", 0, false).unwrap().pins(), vec!["G2"]);
    }

    #[test]
    fn sdcard_template_on_other_header() {
        let connectors = connectors().unwrap();
        let catalog = ResourceCatalog::from_resources(sdcard_pmod_io("pmoda"), &connectors).unwrap();
        assert_eq!(catalog.lookup("spisdcard:clk", 0, false).unwrap().pins(), vec!["G17"]);
    }

    #[test]
    fn sdcard_template_on_unknown_header() {
        let connectors = connectors().unwrap();
        let err = ResourceCatalog::from_resources(sdcard_pmod_io("pmodz"), &connectors).unwrap_err();
        assert_eq!(err, CatalogError::Pin(PinError::UnknownConnector("pmodz".to_string())));
    }

    #[test]
    fn default_clock_period() {
        assert!((DEFAULT_CLOCK.period_ns - 10.0).abs() < 1e-9);
    }
}
