//! Line-oriented scenario files.
//!
//! ```text
//! present,conjunction
//! 1.5,-2,0.25,green,cube
//! 3,0,-4,red,cube
//! ```
//!
//! The first line holds target presence and search type. Every other line is
//! one placement, either `x,y,z,color,shape` or the spherical form
//! `s,radius,polar,elevation,c,x,y,z,color,shape`. A file sticks to one layout.
//! Header fields past the first two are ignored.

use crate::error::ScenarioError;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use vsearch_core::{Layout, ObjectKind, Placement, Scenario, SearchType, Spherical, Vec3};

const CARTESIAN_FIELDS: usize = 5;
const SPHERICAL_FIELDS: usize = 10;

/// `<dir>/<name>.txt`
pub fn scenario_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{name}.txt"))
}

pub fn encode(scenario: &Scenario) -> String {
    let mut out = format!(
        "{},{}\n",
        scenario.presence_str(),
        scenario.search_type.as_str()
    );
    for p in scenario.placements() {
        out.push_str(&encode_placement(p, scenario.layout));
        out.push('\n');
    }
    out
}

pub fn encode_placement(p: &Placement, layout: Layout) -> String {
    let Vec3 { x, y, z } = p.position;
    let color = p.kind.color();
    let shape = p.kind.shape();
    match layout {
        Layout::Cartesian => format!("{x},{y},{z},{color},{shape}"),
        Layout::Spherical => {
            let s = p.spherical();
            format!(
                "s,{},{},{},c,{x},{y},{z},{color},{shape}",
                s.radius, s.polar, s.elevation
            )
        }
    }
}

/// Parses scenario text, calling `on_place` once per resolved placement in
/// file order.
///
/// Lines naming an unknown color/shape pair are skipped with a warning.
pub fn decode<F>(text: &str, mut on_place: F) -> Result<Scenario, ScenarioError>
where
    F: FnMut(ObjectKind, Vec3),
{
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (target_present, search_type) = match lines.next() {
        Some((n, header)) => parse_header(n, header)?,
        None => return Err(ScenarioError::format(1, "missing header line")),
    };

    let mut layout = None;
    let mut placements = Vec::new();
    let mut targets = 0;

    for (n, line) in lines {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let line_layout = if fields[0] == "s" {
            Layout::Spherical
        } else {
            Layout::Cartesian
        };
        match layout {
            None => layout = Some(line_layout),
            Some(l) if l != line_layout => {
                return Err(ScenarioError::format(n, "mixed cartesian and spherical lines"));
            }
            Some(_) => {}
        }

        let Some(placement) = parse_placement(n, &fields, line_layout)? else {
            warn!(
                "line {n}: skipping unknown object {:?}",
                &fields[fields.len() - 2..]
            );
            continue;
        };

        if placement.is_target() {
            targets += 1;
            if targets > 1 {
                return Err(ScenarioError::format(n, "more than one target placement"));
            }
        }

        on_place(placement.kind, placement.position);
        placements.push(placement);
    }

    if target_present != (targets == 1) {
        warn!(
            "header says target {} but {} target placement(s) found",
            if target_present { "present" } else { "absent" },
            targets
        );
    }

    debug!("decoded {} placements", placements.len());
    Ok(Scenario::new(
        target_present,
        search_type,
        layout.unwrap_or_default(),
        placements,
    ))
}

pub fn read_scenario_file<F>(path: impl AsRef<Path>, on_place: F) -> Result<Scenario, ScenarioError>
where
    F: FnMut(ObjectKind, Vec3),
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&text, on_place)
}

pub fn write_scenario_file(path: impl AsRef<Path>, scenario: &Scenario) -> Result<(), ScenarioError> {
    let path = path.as_ref();
    let io_err = |source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    fs::write(path, encode(scenario)).map_err(io_err)?;
    debug!("scenario written to {}", path.display());
    Ok(())
}

fn parse_header(line: usize, header: &str) -> Result<(bool, SearchType), ScenarioError> {
    let mut fields = header.split(',');
    let (Some(presence), Some(search)) = (fields.next(), fields.next()) else {
        return Err(ScenarioError::format(
            line,
            format!("expected `presence,searchType` header, got {header:?}"),
        ));
    };
    let target_present = match presence.trim() {
        "present" => true,
        "absent" => false,
        other => {
            return Err(ScenarioError::format(
                line,
                format!("unknown target presence {other:?}"),
            ));
        }
    };
    let search_type = search
        .trim()
        .parse()
        .map_err(|_| ScenarioError::format(line, format!("unknown search type {search:?}")))?;
    Ok((target_present, search_type))
}

fn parse_placement(
    line: usize,
    fields: &[&str],
    layout: Layout,
) -> Result<Option<Placement>, ScenarioError> {
    let expected = match layout {
        Layout::Cartesian => CARTESIAN_FIELDS,
        Layout::Spherical => SPHERICAL_FIELDS,
    };
    if fields.len() != expected {
        return Err(ScenarioError::format(
            line,
            format!("expected {expected} fields, found {}", fields.len()),
        ));
    }

    let num = |i: usize| -> Result<f32, ScenarioError> {
        fields[i].parse().map_err(|source| ScenarioError::Parse {
            line,
            value: fields[i].to_string(),
            source,
        })
    };

    let placement = match layout {
        Layout::Cartesian => {
            let position = Vec3::new(num(0)?, num(1)?, num(2)?);
            ObjectKind::from_names(fields[3], fields[4]).map(|kind| Placement::new(kind, position))
        }
        Layout::Spherical => {
            if fields[4] != "c" {
                return Err(ScenarioError::format(
                    line,
                    "spherical line is missing the `c` separator",
                ));
            }
            let spherical = Spherical::new(num(1)?, num(2)?, num(3)?);
            let position = Vec3::new(num(5)?, num(6)?, num(7)?);
            ObjectKind::from_names(fields[8], fields[9]).map(|kind| Placement {
                kind,
                position,
                spherical: Some(spherical),
            })
        }
    };
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsearch_core::{Color, Shape};

    fn decode_collect(text: &str) -> Result<(Scenario, Vec<(ObjectKind, Vec3)>), ScenarioError> {
        let mut spawned = Vec::new();
        let scenario = decode(text, |kind, pos| spawned.push((kind, pos)))?;
        Ok((scenario, spawned))
    }

    #[test]
    fn single_target_at_origin() {
        let (scenario, spawned) = decode_collect("present,feature\n0,0,0,red,cube\n").unwrap();
        assert!(scenario.target_present);
        assert_eq!(scenario.search_type, SearchType::Feature);
        assert_eq!(scenario.len(), 1);

        let p = scenario.placements()[0];
        assert!(p.is_target());
        assert_eq!(p.kind.shape(), Shape::Cube);
        assert_eq!(p.kind.color(), Color::Red);
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(spawned, vec![(ObjectKind::Target, Vec3::ZERO)]);
    }

    #[test]
    fn unknown_shape_is_skipped_without_error() {
        let text = "absent,feature\n1,2,3,green,cube\n4,5,6,red,pyramid\n";
        let (scenario, spawned) = decode_collect(text).unwrap();
        assert_eq!(scenario.len(), 1);
        assert_eq!(spawned.len(), 1);
        assert_eq!(scenario.placements()[0].kind, ObjectKind::GreenCube);
    }

    #[test]
    fn header_without_pair_is_format_error() {
        let err = decode("present\n0,0,0,red,cube\n", |_, _| {}).unwrap_err();
        assert!(matches!(err, ScenarioError::Format { line: 1, .. }));

        let err = decode("", |_, _| {}).unwrap_err();
        assert!(matches!(err, ScenarioError::Format { line: 1, .. }));
    }

    #[test]
    fn extra_header_fields_are_ignored() {
        for text in ["present,feature,\n0,0,0,red,cube\n", "present,conjunction,x\n0,0,0,red,cube\n"] {
            let (scenario, placed) = decode_collect(text).unwrap();
            assert!(scenario.target_present);
            assert_eq!(placed.len(), 1);
        }
        let (scenario, _) = decode_collect("absent,conjunction,x\n").unwrap();
        assert_eq!(scenario.search_type, SearchType::Conjunction);
    }

    #[test]
    fn unknown_header_values_are_rejected() {
        assert!(decode("maybe,feature\n", |_, _| {}).is_err());
        assert!(decode("present,parallel\n", |_, _| {}).is_err());
    }

    #[test]
    fn malformed_number_is_parse_error_with_line() {
        let err = decode("absent,feature\n1,2,3,green,cube\n1,two,3,green,cube\n", |_, _| {})
            .unwrap_err();
        match err {
            ScenarioError::Parse { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_is_format_error() {
        let err = decode("absent,feature\n1,2,green,cube\n", |_, _| {}).unwrap_err();
        assert!(matches!(err, ScenarioError::Format { line: 2, .. }));
    }

    #[test]
    fn mixed_layouts_are_rejected() {
        let text = "absent,feature\n1,2,3,green,cube\ns,1,0,0,c,1,0,0,green,cube\n";
        let err = decode(text, |_, _| {}).unwrap_err();
        assert!(matches!(err, ScenarioError::Format { line: 3, .. }));
    }

    #[test]
    fn second_target_is_rejected() {
        let text = "present,feature\n0,0,0,red,cube\n1,1,1,red,cube\n";
        let err = decode(text, |_, _| {}).unwrap_err();
        assert!(matches!(err, ScenarioError::Format { line: 3, .. }));
    }

    #[test]
    fn spherical_line_keeps_both_forms() {
        let text = "absent,conjunction\ns,6,1.5,0.25,c,0.3,1.4,5.8,red,sphere\n";
        let (scenario, spawned) = decode_collect(text).unwrap();
        assert_eq!(scenario.layout, Layout::Spherical);
        assert_eq!(scenario.search_type, SearchType::Conjunction);

        let p = scenario.placements()[0];
        assert_eq!(p.kind, ObjectKind::RedSphere);
        assert_eq!(p.position, Vec3::new(0.3, 1.4, 5.8));
        assert_eq!(p.spherical, Some(Spherical::new(6.0, 1.5, 0.25)));
        assert_eq!(spawned[0].1, p.position);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let text = "present,feature\r\n0,0,0,red,cube\r\n\r\n";
        let (scenario, _) = decode_collect(text).unwrap();
        assert_eq!(scenario.len(), 1);
    }

    #[test]
    fn encode_writes_header_then_one_line_per_placement() {
        let scenario = Scenario::new(
            true,
            SearchType::Feature,
            Layout::Cartesian,
            vec![
                Placement::new(ObjectKind::GreenCube, Vec3::new(1.5, -2.0, 0.25)),
                Placement::new(ObjectKind::Target, Vec3::new(3.0, 0.0, -4.0)),
            ],
        );
        assert_eq!(
            encode(&scenario),
            "present,feature\n1.5,-2,0.25,green,cube\n3,0,-4,red,cube\n"
        );
    }

    #[test]
    fn spherical_encoding_derives_missing_angles() {
        let p = Placement::new(ObjectKind::GreenSphere, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(
            encode_placement(&p, Layout::Spherical),
            "s,2,0,0,c,2,0,0,green,sphere"
        );
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = scenario_path(dir.path(), "s1");
        let scenario = Scenario::new(
            false,
            SearchType::Conjunction,
            Layout::Cartesian,
            vec![
                Placement::new(ObjectKind::GreenCube, Vec3::new(0.1, 0.2, 0.3)),
                Placement::new(ObjectKind::RedSphere, Vec3::new(-7.25, 3.5, 1.0)),
            ],
        );
        write_scenario_file(&path, &scenario).unwrap();
        let loaded = read_scenario_file(&path, |_, _| {}).unwrap();
        assert_eq!(loaded, scenario);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_scenario_file(scenario_path(dir.path(), "nope"), |_, _| {}).unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }
}
