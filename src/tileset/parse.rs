//! Structs defined here mirror the .tsx format 1:1.
//! Policies (duplicates, skipping broken tiles) are applied later by [`TilesetDescriptor`](super::TilesetDescriptor).
use roxmltree::{Document, Node};
use crate::validate_relative;
use crate::tileset::{ErrorKind, Grid, Orientation, SkippedTile, TileDefinition, TileImage, TsxParseError};


#[derive(Default, Debug)]
pub struct Tileset {
    pub version: Option<String>,
    pub tiled_version: Option<String>,
    pub name: String,
    pub class: Option<String>,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: Option<u32>,
    pub columns: u32,
    pub grid: Option<Grid>,
    pub tiles: Vec<TileEntry>,
    pub rejected: Vec<SkippedTile>,
}

/// A successfully parsed <tile>, with where it came from.
#[derive(Debug)]
pub struct TileEntry {
    pub position: usize,
    pub line: u32,
    pub tile: TileDefinition,
}

impl Tileset {

    pub fn parse_doc(doc: &Document) -> Result<Self, TsxParseError> {
        let root = doc.root_element();
        let tag_name = root.tag_name().name();
        if tag_name != "tileset" {
            return Err(TsxParseError::UnexpectedRoot { tag_name: String::from(tag_name) });
        }
        let mut tileset = Tileset::default();
        tileset.parse(doc, root)?;
        Ok(tileset)
    }

    fn parse(&mut self, doc: &Document, tileset_node: Node) -> Result<(), TsxParseError> {

        // Parses attributes
        let mut name = None;
        let mut tile_width = None;
        let mut tile_height = None;
        for attribute in tileset_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "version" => self.version = Some(String::from(value)),
                "tiledversion" => self.tiled_version = Some(String::from(value)),
                "name" => name = Some(value),
                "class" => self.class = non_empty(Some(value)).map(String::from),
                "tilewidth" => tile_width = Some(parse_u32("tileset", "tilewidth", value)?),
                "tileheight" => tile_height = Some(parse_u32("tileset", "tileheight", value)?),
                "tilecount" => self.tile_count = Some(parse_u32("tileset", "tilecount", value)?),
                "columns" => self.columns = parse_u32("tileset", "columns", value)?,
                _ => {}
            }
        }
        self.name = String::from(name.ok_or(TsxParseError::MissingTilesetAttribute { attribute: "name" })?);
        self.tile_width = tile_width.ok_or(TsxParseError::MissingTilesetAttribute { attribute: "tilewidth" })?;
        self.tile_height = tile_height.ok_or(TsxParseError::MissingTilesetAttribute { attribute: "tileheight" })?;

        // Parses children
        let mut position = 0;
        for child in tileset_node.children().filter(|node| node.is_element()) {
            match child.tag_name().name() {
                "grid" => self.grid = Some(parse_grid(child)?),
                "tile" => {
                    let line = doc.text_pos_at(child.range().start).row;
                    match parse_tile(child) {
                        Ok(tile) => self.tiles.push(TileEntry { position, line, tile }),
                        Err(error) if error.kind() == ErrorKind::Reference => {
                            let id = child.attribute("id").and_then(|id| id.parse().ok());
                            self.rejected.push(SkippedTile { position, line, id, error });
                        },
                        Err(error) => return Err(error),
                    }
                    position += 1;
                },
                _ => {}
            }
        }
        Ok(())
    }
}

fn parse_tile(tile_node: Node) -> Result<TileDefinition, TsxParseError> {
    let mut id = None;
    let mut tile_type = None;
    let mut class = None;
    for attribute in tile_node.attributes() {
        let value = attribute.value();
        match attribute.name() {
            "id" => id = Some(parse_u32("tile", "id", value)?),
            "type" => tile_type = Some(value),
            "class" => class = Some(value),
            _ => {}
        }
    }
    let Some(id) = id else {
        return Err(TsxParseError::MissingAttribute { element: "tile", attribute: "id" });
    };

    // Newer Tiled versions write "class" where older ones wrote "type"
    let tile_type = non_empty(tile_type)
        .or(non_empty(class))
        .map(String::from);

    let mut images = tile_node
        .children()
        .filter(|child| child.has_tag_name("image"));
    let image_node = images.next().ok_or(TsxParseError::MissingImage { id })?;
    if images.next().is_some() {
        return Err(TsxParseError::MultipleImages { id });
    }
    let image = parse_image(image_node, id)?;

    Ok(TileDefinition { id, tile_type, image })
}

fn parse_image(image_node: Node, id: u32) -> Result<TileImage, TsxParseError> {
    let mut source = None;
    let mut width = None;
    let mut height = None;
    for attribute in image_node.attributes() {
        let value = attribute.value();
        match attribute.name() {
            "source" => source = Some(value),
            "width" => width = Some(parse_u32("image", "width", value)?),
            "height" => height = Some(parse_u32("image", "height", value)?),
            _ => {}
        }
    }
    let source = source.ok_or(TsxParseError::MissingAttribute { element: "image", attribute: "source" })?;
    if let Err(reason) = validate_relative(source) {
        return Err(TsxParseError::MalformedImageSource { id, path: String::from(source), reason });
    }
    let width = width.ok_or(TsxParseError::MissingAttribute { element: "image", attribute: "width" })?;
    let height = height.ok_or(TsxParseError::MissingAttribute { element: "image", attribute: "height" })?;
    Ok(TileImage {
        source: String::from(source),
        width,
        height,
    })
}

fn parse_grid(grid_node: Node) -> Result<Grid, TsxParseError> {
    let mut grid = Grid::default();
    for attribute in grid_node.attributes() {
        let value = attribute.value();
        match attribute.name() {
            "orientation" => grid.orientation = Orientation::parse(value)?,
            "width" => grid.width = parse_u32("grid", "width", value)?,
            "height" => grid.height = parse_u32("grid", "height", value)?,
            _ => {}
        }
    }
    Ok(grid)
}

fn parse_u32(element: &'static str, attribute: &'static str, value: &str) -> Result<u32, TsxParseError> {
    value.parse().map_err(|_| TsxParseError::InvalidInteger {
        element,
        attribute,
        value: String::from(value),
    })
}

fn non_empty(label: Option<&str>) -> Option<&str> {
    label.filter(|label| !label.is_empty())
}

#[cfg(test)]
mod test {
    use roxmltree::Document;
    use crate::tileset::{ErrorKind, Orientation, TsxParseError};
    use super::Tileset;

    fn parse(source: &str) -> Result<Tileset, TsxParseError> {
        let doc = Document::parse(source)?;
        Tileset::parse_doc(&doc)
    }

    #[test]
    fn header_and_grid() {
        let tileset = parse(
r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.0" name="Objects" tilewidth="144" tileheight="144" tilecount="0" columns="0">
 <grid orientation="isometric" width="2" height="3"/>
</tileset>"#).unwrap();
        assert_eq!(Some("1.10"), tileset.version.as_deref());
        assert_eq!(Some("1.10.0"), tileset.tiled_version.as_deref());
        assert_eq!("Objects", tileset.name);
        assert_eq!((144, 144), (tileset.tile_width, tileset.tile_height));
        assert_eq!(Some(0), tileset.tile_count);
        let grid = tileset.grid.unwrap();
        assert_eq!(Orientation::Isometric, grid.orientation);
        assert_eq!((2, 3), (grid.width, grid.height));
    }

    #[test]
    fn positions_and_lines() {
        let tileset = parse(
r#"<tileset name="t" tilewidth="1" tileheight="1">
 <tile id="3"><image width="1" height="1" source="a.png"/></tile>
 <tile><image width="1" height="1" source="b.png"/></tile>
 <tile id="8"><image width="1" height="1" source="c.png"/></tile>
</tileset>"#).unwrap();
        let positions: Vec<(usize, u32, u32)> = tileset.tiles
            .iter()
            .map(|entry| (entry.position, entry.line, entry.tile.id))
            .collect();
        assert_eq!(vec![(0, 2, 3), (2, 4, 8)], positions);
        assert_eq!(1, tileset.rejected.len());
        assert_eq!(1, tileset.rejected[0].position);
        assert_eq!(3, tileset.rejected[0].line);
        assert_eq!(None, tileset.rejected[0].id);
    }

    #[test]
    fn class_fallback() {
        let tileset = parse(
r#"<tileset name="t" tilewidth="1" tileheight="1">
 <tile id="0" class="Spike"><image width="1" height="1" source="a.png"/></tile>
 <tile id="1" type="" class="Door"><image width="1" height="1" source="b.png"/></tile>
 <tile id="2" type=""><image width="1" height="1" source="c.png"/></tile>
 <tile id="3" type="Portal" class="Door"><image width="1" height="1" source="d.png"/></tile>
</tileset>"#).unwrap();
        let types: Vec<Option<&str>> = tileset.tiles
            .iter()
            .map(|entry| entry.tile.tile_type())
            .collect();
        assert_eq!(vec![Some("Spike"), Some("Door"), None, Some("Portal")], types);
    }

    #[test]
    fn format_errors_are_fatal() {
        let err = parse(r#"<map name="t"/>"#).err().unwrap();
        assert!(matches!(err, TsxParseError::UnexpectedRoot { .. }));
        assert_eq!(ErrorKind::Format, err.kind());

        let err = parse(r#"<tileset name="t" tilewidth="wide"/>"#).err().unwrap();
        assert!(matches!(err, TsxParseError::InvalidInteger { attribute: "tilewidth", .. }));

        let err = parse(
r#"<tileset name="t" tilewidth="1" tileheight="1">
 <tile id="-1"><image width="1" height="1" source="a.png"/></tile>
</tileset>"#).err().unwrap();
        assert!(matches!(err, TsxParseError::InvalidInteger { element: "tile", attribute: "id", .. }));

        let err = parse(r#"<tileset name="t" tilewidth="1" tileheight="1"><grid orientation="hexagonal"/></tileset>"#).err().unwrap();
        assert!(matches!(err, TsxParseError::InvalidAttributeValue { attribute: "orientation", .. }));

        let err = parse(r#"<tileset name="t"><tile id="0">"#).err().unwrap();
        assert!(matches!(err, TsxParseError::XmlError(_)));
    }

    #[test]
    fn reference_errors_are_collected() {
        let tileset = parse(
r#"<tileset name="t" tilewidth="1" tileheight="1">
 <tile id="0"/>
 <tile id="1"><image width="1" height="1"/></tile>
 <tile id="2"><image height="1" source="a.png"/></tile>
 <tile id="3"><image width="1" height="1" source="/abs/a.png"/></tile>
</tileset>"#).unwrap();
        assert!(tileset.tiles.is_empty());
        let ids: Vec<Option<u32>> = tileset.rejected.iter().map(|skipped| skipped.id).collect();
        assert_eq!(vec![Some(0), Some(1), Some(2), Some(3)], ids);
        assert!(tileset.rejected.iter().all(|skipped| skipped.error.kind() == ErrorKind::Reference));
        assert!(matches!(tileset.rejected[0].error, TsxParseError::MissingImage { id: 0 }));
        assert!(matches!(tileset.rejected[1].error, TsxParseError::MissingAttribute { element: "image", attribute: "source" }));
        assert!(matches!(tileset.rejected[2].error, TsxParseError::MissingAttribute { element: "image", attribute: "width" }));
        assert!(matches!(tileset.rejected[3].error, TsxParseError::MalformedImageSource { id: 3, .. }));
    }

    #[test]
    fn header_requires_name_and_cell_size() {
        let err = parse("<tileset/>").err().unwrap();
        assert!(matches!(err, TsxParseError::MissingTilesetAttribute { attribute: "name" }));
        assert_eq!(ErrorKind::Format, err.kind());

        let err = parse(r#"<tileset name="t" tileheight="1"/>"#).err().unwrap();
        assert!(matches!(err, TsxParseError::MissingTilesetAttribute { attribute: "tilewidth" }));

        let err = parse(r#"<tileset name="t" tilewidth="1"/>"#).err().unwrap();
        assert!(matches!(err, TsxParseError::MissingTilesetAttribute { attribute: "tileheight" }));
        assert_eq!(ErrorKind::Format, err.kind());

        let tileset = parse(r#"<tileset name="" tilewidth="0" tileheight="0"/>"#).unwrap();
        assert_eq!("", tileset.name);
    }

    #[test]
    fn second_image_is_rejected() {
        let tileset = parse(
r#"<tileset name="t" tilewidth="1" tileheight="1">
 <tile id="0"><image width="1" height="1" source="a.png"/><image width="1" height="1" source="b.png"/></tile>
 <tile id="1"><image width="1" height="1" source="c.png"/></tile>
</tileset>"#).unwrap();
        assert_eq!(1, tileset.tiles.len());
        assert_eq!(1, tileset.tiles[0].tile.id);
        assert_eq!(1, tileset.rejected.len());
        assert!(matches!(tileset.rejected[0].error, TsxParseError::MultipleImages { id: 0 }));
        assert_eq!(ErrorKind::Reference, tileset.rejected[0].error.kind());
    }
}
