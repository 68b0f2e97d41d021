use crate::cells::MapCoordinate;

pub trait GridDisplay {
    /// Render the contents of a maze cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: MapCoordinate) -> String {
        String::from("   ")
    }
}
