//! Run metadata documents: `RunInfo.xml` and `runParameters.xml`.
//!
//! Rendered from serde structs via quick-xml so element order and
//! attribute spelling stay fixed by declaration. Platform differences:
//! sectioned platforms advertise SectionPerLane/LanePerSection, the
//! patterned-flow-cell platforms embed the full tile set with their
//! naming convention plus image dimensions and channels, and the PhiX
//! alignment element appears only where the instrument writes it.

use serde::Serialize;

use crate::{addressing, config::Platform, Result, Run};

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";
const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Serialize)]
#[serde(rename = "RunInfo")]
struct RunInfoDoc<'a> {
    #[serde(rename = "@xmlns:xsd")]
    xmlns_xsd: &'static str,
    #[serde(rename = "@xmlns:xsi")]
    xmlns_xsi: &'static str,
    #[serde(rename = "@Version")]
    version: u32,
    #[serde(rename = "Run")]
    run: RunElement,
    #[serde(rename = "Flowcell")]
    flowcell: &'a str,
    #[serde(rename = "Instrument")]
    instrument: &'static str,
}

#[derive(Serialize)]
struct RunElement {
    #[serde(rename = "@Id")]
    id: String,
    #[serde(rename = "@Number")]
    number: u32,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Reads")]
    reads: ReadsElement,
    #[serde(rename = "FlowcellLayout")]
    flowcell_layout: FlowcellLayout,
    #[serde(rename = "ImageDimensions", skip_serializing_if = "Option::is_none")]
    image_dimensions: Option<ImageDimensions>,
    #[serde(rename = "ImageChannels", skip_serializing_if = "Option::is_none")]
    image_channels: Option<ImageChannels>,
    #[serde(rename = "AlignToPhiX", skip_serializing_if = "Option::is_none")]
    align_to_phix: Option<AlignToPhiX>,
}

#[derive(Serialize)]
struct ReadsElement {
    #[serde(rename = "Read")]
    reads: Vec<ReadElement>,
}

#[derive(Serialize)]
struct ReadElement {
    #[serde(rename = "@Number")]
    number: u32,
    #[serde(rename = "@NumCycles")]
    num_cycles: u32,
    #[serde(rename = "@IsIndexedRead")]
    is_indexed_read: &'static str,
}

#[derive(Serialize)]
struct FlowcellLayout {
    #[serde(rename = "@LaneCount")]
    lane_count: u32,
    #[serde(rename = "@SurfaceCount")]
    surface_count: u32,
    #[serde(rename = "@SwathCount")]
    swath_count: u32,
    #[serde(rename = "@TileCount")]
    tile_count: u32,
    #[serde(rename = "@SectionPerLane", skip_serializing_if = "Option::is_none")]
    section_per_lane: Option<u32>,
    #[serde(rename = "@LanePerSection", skip_serializing_if = "Option::is_none")]
    lane_per_section: Option<u32>,
    #[serde(rename = "TileSet", skip_serializing_if = "Option::is_none")]
    tile_set: Option<TileSet>,
}

#[derive(Serialize)]
struct TileSet {
    #[serde(rename = "@TileNamingConvention")]
    tile_naming_convention: &'static str,
    #[serde(rename = "Tiles")]
    tiles: TilesElement,
}

#[derive(Serialize)]
struct TilesElement {
    #[serde(rename = "Tile")]
    tiles: Vec<String>,
}

#[derive(Serialize)]
struct ImageDimensions {
    #[serde(rename = "@Width")]
    width: u32,
    #[serde(rename = "@Height")]
    height: u32,
}

#[derive(Serialize)]
struct ImageChannels {
    #[serde(rename = "Name")]
    names: Vec<&'static str>,
}

#[derive(Serialize)]
struct AlignToPhiX {
    #[serde(rename = "Lane", skip_serializing_if = "Vec::is_empty")]
    lanes: Vec<u32>,
}

fn tile_list(run: &Run) -> Vec<String> {
    run.lanes
        .iter()
        .flat_map(|lane| {
            lane.tiles()
                .map(|t| addressing::tile_name(run.config.platform, lane.idx, &t))
        })
        .collect()
}

fn render<T: Serialize>(doc: &T) -> Result<String> {
    let mut body = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut body);
    ser.indent(' ', 2);
    doc.serialize(ser)?;
    Ok(format!("{XML_DECL}\n{body}\n"))
}

/// Renders the `RunInfo.xml` document for a populated run.
pub fn run_info_xml(run: &Run) -> Result<String> {
    let config = &run.config;
    let platform = config.platform;

    let reads = ReadsElement {
        reads: config
            .reads
            .iter()
            .enumerate()
            .map(|(i, read)| ReadElement {
                number: i as u32 + 1,
                num_cycles: read.num_cycles,
                is_indexed_read: if read.is_indexed { "Y" } else { "N" },
            })
            .collect(),
    };

    let tile_set = platform.tile_naming().map(|naming| TileSet {
        tile_naming_convention: naming.label(),
        tiles: TilesElement {
            tiles: tile_list(run),
        },
    });
    let patterned = tile_set.is_some();

    let flowcell_layout = FlowcellLayout {
        lane_count: config.lanes,
        surface_count: config.surfaces,
        swath_count: config.swaths,
        tile_count: config.tiles,
        section_per_lane: platform.has_sections().then_some(config.sections),
        lane_per_section: platform.has_sections().then_some(2),
        tile_set,
    };

    let align_to_phix = match platform {
        Platform::Hiseqx => Some(AlignToPhiX { lanes: Vec::new() }),
        Platform::Hiseq2500 => Some(AlignToPhiX {
            lanes: (1..=config.lanes).collect(),
        }),
        _ => None,
    };

    let doc = RunInfoDoc {
        xmlns_xsd: XSD_NS,
        xmlns_xsi: XSI_NS,
        version: 4,
        run: RunElement {
            id: run.id.clone(),
            number: 2,
            date: config.date.clone(),
            reads,
            flowcell_layout,
            image_dimensions: patterned.then_some(ImageDimensions {
                width: config.dims.width,
                height: config.dims.height,
            }),
            image_channels: patterned.then_some(ImageChannels {
                names: vec!["Red", "Green"],
            }),
            align_to_phix,
        },
        flowcell: &config.flowcell,
        instrument: platform.machine_name(),
    };
    render(&doc)
}

#[derive(Serialize)]
#[serde(rename = "RunParameters")]
struct RunParametersDoc {
    #[serde(rename = "@xmlns:xsd")]
    xmlns_xsd: &'static str,
    #[serde(rename = "@xmlns:xsi")]
    xmlns_xsi: &'static str,
    #[serde(rename = "Setup")]
    setup: SetupElement,
}

#[derive(Serialize)]
struct SetupElement {
    #[serde(rename = "ApplicationName")]
    application_name: &'static str,
    #[serde(rename = "ApplicationVersion")]
    application_version: &'static str,
    #[serde(rename = "ExperimentName")]
    experiment_name: &'static str,
    #[serde(rename = "ComputerName")]
    computer_name: &'static str,
    #[serde(rename = "RunStartDate")]
    run_start_date: String,
}

/// Renders the `runParameters.xml` document.
pub fn run_parameters_xml(run: &Run) -> Result<String> {
    let platform = run.config.platform;
    let doc = RunParametersDoc {
        xmlns_xsd: XSD_NS,
        xmlns_xsi: XSI_NS,
        setup: SetupElement {
            application_name: platform.application_name(),
            application_version: platform.application_version(),
            experiment_name: "TestDataExperiment",
            computer_name: "TC1",
            run_start_date: run.config.date.clone(),
        },
    };
    render(&doc)
}
