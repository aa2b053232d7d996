//! OpenDRIVE (`.xodr`) reading and writing.
//!
//! Covers the header, road plan view, elevation and superelevation
//! profiles, lane offsets, lane sections with their per-lane records, road
//! links and junction connections. Everything else in a document is skipped
//! with a warning.

use std::fmt::Write;
use std::path::Path;

use log::warn;
use roxmltree::{Document, Node};

use crate::error::{OdrError, Result};
use crate::geometry::{GeometryKind, GeometryPrimitive, ParamRange};
use crate::junction::{Connection, Junction};
use crate::lane::{AccessRecord, Lane, LaneType, MaterialRecord, RoadMark, SpeedRecord};
use crate::lane_section::LaneSection;
use crate::link::{ContactPoint, ElementType, RoadLink};
use crate::network::{Header, RoadNetwork};
use crate::polynomial::CubicPoly;
use crate::road::Road;

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| c.has_tag_name(tag))
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        OdrError::Xml(format!(
            "<{}> is missing attribute '{}'",
            node.tag_name().name(),
            name
        ))
    })
}

fn attr_f64(node: Node, name: &str) -> Result<f64> {
    let raw = attr(node, name)?;
    raw.trim().parse().map_err(|_| {
        OdrError::Xml(format!(
            "<{}> attribute '{}' is not a number: '{}'",
            node.tag_name().name(),
            name,
            raw
        ))
    })
}

fn attr_f64_or(node: Node, name: &str, default: f64) -> Result<f64> {
    match node.attribute(name) {
        Some(_) => attr_f64(node, name),
        None => Ok(default),
    }
}

fn attr_parse<T: std::str::FromStr>(node: Node, name: &str) -> Result<T> {
    let raw = attr(node, name)?;
    raw.trim().parse().map_err(|_| {
        OdrError::Xml(format!(
            "<{}> attribute '{}' has invalid value '{}'",
            node.tag_name().name(),
            name,
            raw
        ))
    })
}

fn attr_string(node: Node, name: &str, default: &str) -> String {
    node.attribute(name).unwrap_or(default).to_string()
}

fn cubic(node: Node, s_attr: &str) -> Result<CubicPoly> {
    Ok(CubicPoly::new(
        attr_f64(node, s_attr)?,
        attr_f64_or(node, "a", 0.0)?,
        attr_f64_or(node, "b", 0.0)?,
        attr_f64_or(node, "c", 0.0)?,
        attr_f64_or(node, "d", 0.0)?,
    ))
}

fn parse_header(node: Node) -> Result<Header> {
    let defaults = Header::default();
    Ok(Header {
        rev_major: match node.attribute("revMajor") {
            Some(_) => attr_parse(node, "revMajor")?,
            None => defaults.rev_major,
        },
        rev_minor: match node.attribute("revMinor") {
            Some(_) => attr_parse(node, "revMinor")?,
            None => defaults.rev_minor,
        },
        name: attr_string(node, "name", ""),
        version: attr_string(node, "version", &defaults.version),
        date: attr_string(node, "date", ""),
    })
}

fn parse_link(node: Node) -> Result<RoadLink> {
    let element_type: ElementType = attr(node, "elementType")?
        .parse()
        .map_err(OdrError::Xml)?;
    let element_id = attr_parse(node, "elementId")?;
    Ok(match element_type {
        ElementType::Junction => RoadLink::junction(element_id),
        ElementType::Road => {
            let contact: ContactPoint = node
                .attribute("contactPoint")
                .unwrap_or("start")
                .parse()
                .map_err(OdrError::Xml)?;
            RoadLink::road(element_id, contact)
        }
    })
}

fn parse_geometry(node: Node) -> Result<Option<GeometryPrimitive>> {
    let s = attr_f64(node, "s")?;
    let x = attr_f64(node, "x")?;
    let y = attr_f64(node, "y")?;
    let hdg = attr_f64(node, "hdg")?;
    let length = attr_f64(node, "length")?;
    let Some(shape) = node.children().find(|c| c.is_element()) else {
        warn!("geometry at s={s} has no shape element, skipped");
        return Ok(None);
    };
    let kind = match shape.tag_name().name() {
        "line" => GeometryKind::Line,
        "arc" => GeometryKind::Arc {
            curvature: attr_f64(shape, "curvature")?,
        },
        "spiral" => GeometryKind::Spiral {
            curv_start: attr_f64(shape, "curvStart")?,
            curv_end: attr_f64(shape, "curvEnd")?,
        },
        "poly3" => GeometryKind::Poly3 {
            a: attr_f64(shape, "a")?,
            b: attr_f64(shape, "b")?,
            c: attr_f64(shape, "c")?,
            d: attr_f64(shape, "d")?,
        },
        "paramPoly3" => GeometryKind::ParamPoly3 {
            au: attr_f64(shape, "aU")?,
            bu: attr_f64(shape, "bU")?,
            cu: attr_f64(shape, "cU")?,
            du: attr_f64(shape, "dU")?,
            av: attr_f64(shape, "aV")?,
            bv: attr_f64(shape, "bV")?,
            cv: attr_f64(shape, "cV")?,
            dv: attr_f64(shape, "dV")?,
            p_range: match shape.attribute("pRange") {
                Some("arcLength") => ParamRange::ArcLength,
                _ => ParamRange::Normalized,
            },
        },
        other => {
            warn!("unsupported geometry <{other}> at s={s}, skipped");
            return Ok(None);
        }
    };
    Ok(Some(GeometryPrimitive::new(s, x, y, hdg, length, kind)?))
}

fn parse_lane(node: Node) -> Result<Lane> {
    let id: i32 = attr_parse(node, "id")?;
    let type_name = node.attribute("type").unwrap_or("none");
    let lane_type: LaneType = type_name.parse().unwrap_or_else(|e: String| {
        warn!("lane {id}: {e}, using 'none'");
        LaneType::None
    });
    let mut lane = Lane::new(id, lane_type);
    lane.level = matches!(node.attribute("level"), Some("true") | Some("1"));
    if let Some(link) = child(node, "link") {
        if let Some(p) = child(link, "predecessor") {
            lane.predecessor = Some(attr_parse(p, "id")?);
        }
        if let Some(s) = child(link, "successor") {
            lane.successor = Some(attr_parse(s, "id")?);
        }
    }
    for w in children(node, "width") {
        lane.add_width(cubic(w, "sOffset")?);
    }
    for h in children(node, "height") {
        lane.add_height_record(
            attr_f64(h, "sOffset")?,
            attr_f64_or(h, "inner", 0.0)?,
            attr_f64_or(h, "outer", 0.0)?,
        );
    }
    for m in children(node, "roadMark") {
        let mut mark = RoadMark::new(attr_f64(m, "sOffset")?, m.attribute("type").unwrap_or("none"));
        mark.weight = attr_string(m, "weight", &mark.weight);
        mark.color = attr_string(m, "color", &mark.color);
        mark.width = attr_f64_or(m, "width", mark.width)?;
        mark.lane_change = attr_string(m, "laneChange", &mark.lane_change);
        mark.height = attr_f64_or(m, "height", mark.height)?;
        lane.add_road_mark_record(mark);
    }
    for m in children(node, "material") {
        lane.add_material_record(MaterialRecord {
            s_offset: attr_f64(m, "sOffset")?,
            surface: attr_string(m, "surface", ""),
            friction: attr_f64_or(m, "friction", 0.0)?,
            roughness: attr_f64_or(m, "roughness", 0.0)?,
        });
    }
    for v in children(node, "speed") {
        lane.add_speed_record(SpeedRecord {
            s_offset: attr_f64(v, "sOffset")?,
            max: attr_f64(v, "max")?,
            unit: attr_string(v, "unit", "m/s"),
        });
    }
    for a in children(node, "access") {
        lane.add_access_record(AccessRecord {
            s_offset: attr_f64(a, "sOffset")?,
            rule: attr_string(a, "rule", "allow"),
            restriction: attr_string(a, "restriction", ""),
        });
    }
    Ok(lane)
}

fn parse_lane_section(node: Node, road: &mut Road) -> Result<()> {
    let s = attr_f64(node, "s")?;
    let single_side = matches!(node.attribute("singleSide"), Some("true") | Some("1"));
    let section = road.add_lane_section(s, single_side)?;
    for group in ["left", "center", "right"] {
        for side in children(node, group) {
            for lane in children(side, "lane") {
                section.insert_lane(parse_lane(lane)?)?;
            }
        }
    }
    Ok(())
}

fn parse_road(node: Node) -> Result<Road> {
    let id = attr_parse(node, "id")?;
    let mut road = Road::new(id, attr_string(node, "name", ""));
    road.junction = match node.attribute("junction").map(str::trim) {
        None | Some("-1") | Some("") => None,
        Some(_) => Some(attr_parse(node, "junction")?),
    };
    if let Some(link) = child(node, "link") {
        if let Some(p) = child(link, "predecessor") {
            road.set_predecessor(Some(parse_link(p)?));
        }
        if let Some(s) = child(link, "successor") {
            road.set_successor(Some(parse_link(s)?));
        }
    }
    if let Some(plan_view) = child(node, "planView") {
        for g in children(plan_view, "geometry") {
            if let Some(geometry) = parse_geometry(g)? {
                road.add_geometry(geometry);
            }
        }
    }
    if let Some(profile) = child(node, "elevationProfile") {
        for e in children(profile, "elevation") {
            road.add_elevation(cubic(e, "s")?);
        }
    }
    if let Some(profile) = child(node, "lateralProfile") {
        for e in children(profile, "superelevation") {
            road.add_superelevation(cubic(e, "s")?);
        }
    }
    if let Some(lanes) = child(node, "lanes") {
        for offset in children(lanes, "laneOffset") {
            road.add_lane_offset(cubic(offset, "s")?);
        }
        for section in children(lanes, "laneSection") {
            parse_lane_section(section, &mut road)?;
        }
    }
    road.update_length();
    let declared = attr_f64_or(node, "length", road.length())?;
    if (declared - road.length()).abs() > 1e-3 {
        warn!(
            "road {}: declared length {} differs from geometry length {}",
            road.id(),
            declared,
            road.length()
        );
    }
    Ok(road)
}

fn parse_junction(node: Node) -> Result<Junction> {
    let mut junction = Junction::new(attr_parse(node, "id")?, attr_string(node, "name", ""));
    for c in children(node, "connection") {
        let contact: ContactPoint = node_contact(c)?;
        let mut connection = Connection::new(
            attr_parse(c, "id")?,
            attr_parse(c, "incomingRoad")?,
            attr_parse(c, "connectingRoad")?,
            contact,
        );
        for link in children(c, "laneLink") {
            connection.add_lane_link(attr_parse(link, "from")?, attr_parse(link, "to")?);
        }
        junction.add_connection(connection);
    }
    Ok(junction)
}

fn node_contact(node: Node) -> Result<ContactPoint> {
    node.attribute("contactPoint")
        .unwrap_or("start")
        .parse()
        .map_err(OdrError::Xml)
}

/// Fills in the outgoing road of every connection from the far end of its
/// connecting road.
fn resolve_outgoing_roads(net: &mut RoadNetwork) {
    let mut updates = Vec::new();
    for junction in net.junctions() {
        for connection in junction.connections() {
            let Some(road) = net.road(connection.connecting_road_id) else {
                continue;
            };
            let far_end = match connection.contact_point {
                ContactPoint::Start => road.successor(),
                ContactPoint::End => road.predecessor(),
            };
            if let Some(link) = far_end.filter(|l| l.element_type == ElementType::Road) {
                updates.push((junction.id, connection.id, link.element_id));
            }
        }
    }
    for (jid, cid, outgoing) in updates {
        if let Some(c) = net.junction_mut(jid).and_then(|j| j.connection_mut(cid)) {
            c.outgoing_road_id = Some(outgoing);
        }
    }
}

/// Parses an OpenDRIVE document.
pub fn parse_xodr(xml: &str) -> Result<RoadNetwork> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("OpenDRIVE") {
        return Err(OdrError::Xml(format!(
            "expected <OpenDRIVE> root, found <{}>",
            root.tag_name().name()
        )));
    }
    let mut net = RoadNetwork::new();
    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "header" => net.header = parse_header(node)?,
            "road" => {
                net.add_road(parse_road(node)?);
            }
            "junction" => {
                net.add_junction_instance(parse_junction(node)?);
            }
            other => warn!("skipping unsupported element <{other}>"),
        }
    }
    resolve_outgoing_roads(&mut net);
    Ok(net)
}

pub fn read_xodr(path: impl AsRef<Path>) -> Result<RoadNetwork> {
    let xml = super::read_to_string(path)?;
    parse_xodr(&xml)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn write_link(xml: &mut String, tag: &str, link: &RoadLink) -> Result<()> {
    write!(
        xml,
        "      <{} elementType=\"{}\" elementId=\"{}\"",
        tag,
        link.element_type.as_str(),
        link.element_id
    )?;
    if let Some(cp) = link.contact_point {
        write!(xml, " contactPoint=\"{cp}\"")?;
    }
    writeln!(xml, "/>")?;
    Ok(())
}

fn write_cubic(xml: &mut String, indent: &str, tag: &str, s_attr: &str, p: &CubicPoly) -> Result<()> {
    writeln!(
        xml,
        "{indent}<{tag} {s_attr}=\"{}\" a=\"{}\" b=\"{}\" c=\"{}\" d=\"{}\"/>",
        p.s, p.a, p.b, p.c, p.d
    )?;
    Ok(())
}

fn write_geometry(xml: &mut String, g: &GeometryPrimitive) -> Result<()> {
    writeln!(
        xml,
        "      <geometry s=\"{}\" x=\"{}\" y=\"{}\" hdg=\"{}\" length=\"{}\">",
        g.s(),
        g.x(),
        g.y(),
        g.hdg(),
        g.length()
    )?;
    match *g.kind() {
        GeometryKind::Line => writeln!(xml, "        <line/>")?,
        GeometryKind::Arc { curvature } => {
            writeln!(xml, "        <arc curvature=\"{curvature}\"/>")?
        }
        GeometryKind::Spiral {
            curv_start,
            curv_end,
        } => writeln!(
            xml,
            "        <spiral curvStart=\"{curv_start}\" curvEnd=\"{curv_end}\"/>"
        )?,
        GeometryKind::Poly3 { a, b, c, d } => writeln!(
            xml,
            "        <poly3 a=\"{a}\" b=\"{b}\" c=\"{c}\" d=\"{d}\"/>"
        )?,
        GeometryKind::ParamPoly3 {
            au,
            bu,
            cu,
            du,
            av,
            bv,
            cv,
            dv,
            p_range,
        } => {
            let range = match p_range {
                ParamRange::ArcLength => "arcLength",
                ParamRange::Normalized => "normalized",
            };
            writeln!(
                xml,
                "        <paramPoly3 aU=\"{au}\" bU=\"{bu}\" cU=\"{cu}\" dU=\"{du}\" aV=\"{av}\" bV=\"{bv}\" cV=\"{cv}\" dV=\"{dv}\" pRange=\"{range}\"/>"
            )?
        }
    }
    writeln!(xml, "      </geometry>")?;
    Ok(())
}

fn write_lane(xml: &mut String, lane: &Lane) -> Result<()> {
    const IND: &str = "            ";
    writeln!(
        xml,
        "          <lane id=\"{}\" type=\"{}\" level=\"{}\">",
        lane.id, lane.lane_type, lane.level
    )?;
    if lane.predecessor.is_some() || lane.successor.is_some() {
        writeln!(xml, "{IND}<link>")?;
        if let Some(p) = lane.predecessor {
            writeln!(xml, "{IND}  <predecessor id=\"{p}\"/>")?;
        }
        if let Some(s) = lane.successor {
            writeln!(xml, "{IND}  <successor id=\"{s}\"/>")?;
        }
        writeln!(xml, "{IND}</link>")?;
    }
    for w in lane.widths() {
        write_cubic(xml, IND, "width", "sOffset", w)?;
    }
    for m in lane.road_marks() {
        writeln!(
            xml,
            "{IND}<roadMark sOffset=\"{}\" type=\"{}\" weight=\"{}\" color=\"{}\" width=\"{}\" laneChange=\"{}\" height=\"{}\"/>",
            m.s_offset,
            escape(&m.mark_type),
            escape(&m.weight),
            escape(&m.color),
            m.width,
            escape(&m.lane_change),
            m.height
        )?;
    }
    for m in lane.materials() {
        writeln!(
            xml,
            "{IND}<material sOffset=\"{}\" surface=\"{}\" friction=\"{}\" roughness=\"{}\"/>",
            m.s_offset,
            escape(&m.surface),
            m.friction,
            m.roughness
        )?;
    }
    for v in lane.speeds() {
        writeln!(
            xml,
            "{IND}<speed sOffset=\"{}\" max=\"{}\" unit=\"{}\"/>",
            v.s_offset,
            v.max,
            escape(&v.unit)
        )?;
    }
    for a in lane.accesses() {
        writeln!(
            xml,
            "{IND}<access sOffset=\"{}\" rule=\"{}\" restriction=\"{}\"/>",
            a.s_offset,
            escape(&a.rule),
            escape(&a.restriction)
        )?;
    }
    for h in lane.heights() {
        writeln!(
            xml,
            "{IND}<height sOffset=\"{}\" inner=\"{}\" outer=\"{}\"/>",
            h.s_offset, h.inner, h.outer
        )?;
    }
    writeln!(xml, "          </lane>")?;
    Ok(())
}

fn write_lane_section(xml: &mut String, section: &LaneSection) -> Result<()> {
    writeln!(
        xml,
        "      <laneSection s=\"{}\" singleSide=\"{}\">",
        section.s, section.single_side
    )?;
    // OpenDRIVE lists left lanes outermost first
    let mut left = section.left_lanes();
    left.reverse();
    let groups = [
        ("left", left),
        ("center", section.center_lane().into_iter().collect()),
        ("right", section.right_lanes()),
    ];
    for (tag, lanes) in groups {
        if lanes.is_empty() {
            continue;
        }
        writeln!(xml, "        <{tag}>")?;
        for lane in lanes {
            write_lane(xml, lane)?;
        }
        writeln!(xml, "        </{tag}>")?;
    }
    writeln!(xml, "      </laneSection>")?;
    Ok(())
}

fn write_road(xml: &mut String, road: &Road) -> Result<()> {
    let junction = road.junction.map_or(-1, i64::from);
    writeln!(
        xml,
        "  <road name=\"{}\" length=\"{}\" id=\"{}\" junction=\"{}\">",
        escape(&road.name),
        road.length(),
        road.id(),
        junction
    )?;
    if road.predecessor().is_some() || road.successor().is_some() {
        writeln!(xml, "    <link>")?;
        if let Some(p) = road.predecessor() {
            write_link(xml, "predecessor", p)?;
        }
        if let Some(s) = road.successor() {
            write_link(xml, "successor", s)?;
        }
        writeln!(xml, "    </link>")?;
    }
    writeln!(xml, "    <planView>")?;
    for g in road.geometry_block() {
        write_geometry(xml, g)?;
    }
    writeln!(xml, "    </planView>")?;
    writeln!(xml, "    <elevationProfile>")?;
    for e in road.elevations() {
        write_cubic(xml, "      ", "elevation", "s", e)?;
    }
    writeln!(xml, "    </elevationProfile>")?;
    writeln!(xml, "    <lateralProfile>")?;
    for e in road.superelevations() {
        write_cubic(xml, "      ", "superelevation", "s", e)?;
    }
    writeln!(xml, "    </lateralProfile>")?;
    writeln!(xml, "    <lanes>")?;
    for o in road.lane_offsets() {
        write_cubic(xml, "      ", "laneOffset", "s", o)?;
    }
    for section in road.lane_sections() {
        write_lane_section(xml, section)?;
    }
    writeln!(xml, "    </lanes>")?;
    writeln!(xml, "  </road>")?;
    Ok(())
}

fn write_junction(xml: &mut String, junction: &Junction) -> Result<()> {
    writeln!(
        xml,
        "  <junction name=\"{}\" id=\"{}\">",
        escape(&junction.name),
        junction.id
    )?;
    for c in junction.connections() {
        writeln!(
            xml,
            "    <connection id=\"{}\" incomingRoad=\"{}\" connectingRoad=\"{}\" contactPoint=\"{}\">",
            c.id, c.incoming_road_id, c.connecting_road_id, c.contact_point
        )?;
        for link in c.lane_links() {
            writeln!(
                xml,
                "      <laneLink from=\"{}\" to=\"{}\"/>",
                link.from, link.to
            )?;
        }
        writeln!(xml, "    </connection>")?;
    }
    writeln!(xml, "  </junction>")?;
    Ok(())
}

/// Serializes `net` as an OpenDRIVE document.
pub fn write_xodr_string(net: &RoadNetwork) -> Result<String> {
    let mut xml = String::new();
    writeln!(xml, "<?xml version=\"1.0\" standalone=\"yes\"?>")?;
    writeln!(xml, "<OpenDRIVE>")?;
    let h = &net.header;
    writeln!(
        xml,
        "  <header revMajor=\"{}\" revMinor=\"{}\" name=\"{}\" version=\"{}\" date=\"{}\"/>",
        h.rev_major,
        h.rev_minor,
        escape(&h.name),
        escape(&h.version),
        escape(&h.date)
    )?;
    for road in net.roads() {
        write_road(&mut xml, road)?;
    }
    for junction in net.junctions() {
        write_junction(&mut xml, junction)?;
    }
    writeln!(xml, "</OpenDRIVE>")?;
    Ok(xml)
}

pub fn write_xodr(path: impl AsRef<Path>, net: &RoadNetwork) -> Result<()> {
    let xml = write_xodr_string(net)?;
    super::write_string(path, &xml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;

    const SMALL: &str = r#"<?xml version="1.0"?>
<OpenDRIVE>
  <header revMajor="1" revMinor="6" name="small &amp; simple"/>
  <road name="main" length="30" id="1" junction="-1">
    <planView>
      <geometry s="0" x="0" y="0" hdg="0" length="10"><line/></geometry>
      <geometry s="10" x="10" y="0" hdg="0" length="10"><arc curvature="0.01"/></geometry>
      <geometry s="20" x="20" y="0.5" hdg="0.1" length="10"><spiral curvStart="0.01" curvEnd="0"/></geometry>
    </planView>
    <lanes>
      <laneOffset s="0" a="0.5" b="0" c="0" d="0"/>
      <laneSection s="0">
        <left>
          <lane id="2" type="sidewalk"><width sOffset="0" a="2" b="0" c="0" d="0"/></lane>
          <lane id="1" type="driving"><width sOffset="0" a="3.5" b="0" c="0" d="0"/></lane>
        </left>
        <center><lane id="0" type="none"><roadMark sOffset="0" type="solid"/></lane></center>
        <right>
          <lane id="-1" type="driving" level="true">
            <link><successor id="-1"/></link>
            <width sOffset="0" a="3.5" b="0" c="0" d="0"/>
            <speed sOffset="0" max="13.9" unit="m/s"/>
          </lane>
        </right>
      </laneSection>
    </lanes>
  </road>
  <controller id="9"/>
</OpenDRIVE>
"#;

    #[test]
    fn parses_small_document() {
        let net = parse_xodr(SMALL).unwrap();
        assert_eq!(net.header.name, "small & simple");
        assert_eq!(net.header.rev_minor, 6);
        let road = net.road(1).unwrap();
        assert_eq!(road.geometry_block().len(), 3);
        assert!((road.length() - 30.0).abs() < 1e-9);
        assert!((road.lane_offset_value(5.0) - 0.5).abs() < 1e-9);
        let section = &road.lane_sections()[0];
        assert_eq!(section.lane_count(), 4);
        let right = section.lane(-1).unwrap();
        assert!(right.level);
        assert_eq!(right.successor, Some(-1));
        assert_eq!(right.speeds().len(), 1);
        assert_eq!(section.lane(2).unwrap().lane_type, LaneType::Sidewalk);
    }

    #[test]
    fn written_document_parses_back() {
        let net = parse_xodr(SMALL).unwrap();
        let xml = write_xodr_string(&net).unwrap();
        let again = parse_xodr(&xml).unwrap();
        assert_eq!(again.stats(), net.stats());
        assert_eq!(again.header, net.header);
        assert_eq!(again.road(1), net.road(1));
    }

    #[test]
    fn missing_attribute_is_reported() {
        let xml = r#"<OpenDRIVE><road id="1"><planView><geometry s="0" x="0" hdg="0" length="1"><line/></geometry></planView></road></OpenDRIVE>"#;
        match parse_xodr(xml) {
            Err(OdrError::Xml(msg)) => assert!(msg.contains("'y'")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn infinite_geometry_length_is_rejected() {
        let xml = r#"<OpenDRIVE><road id="1"><planView><geometry s="0" x="0" y="0" hdg="0" length="inf"><line/></geometry></planView></road></OpenDRIVE>"#;
        assert!(matches!(
            parse_xodr(xml),
            Err(OdrError::Geometry(GeometryError::InvalidLength { .. }))
        ));
    }

    #[test]
    fn wrong_root_is_rejected() {
        assert!(matches!(parse_xodr("<LandXML/>"), Err(OdrError::Xml(_))));
    }
}
