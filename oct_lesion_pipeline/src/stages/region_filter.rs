use ndarray::Array2;
use oct_lesion_structures::data::descriptors::AreaBand;
use oct_lesion_structures::data::{BinaryMask, MASK_FOREGROUND};

/// Stage 4: connected-component filtering by enclosed pixel area.
///
/// Extracts every maximal 8-connected foreground component, fills its
/// interior holes, and keeps it only when the enclosed pixel count lies
/// strictly inside the configured area band. Components at or outside the
/// band bounds are dropped entirely. The output is the union of the kept
/// filled interiors, so processing order cannot affect the result.
#[derive(Debug, Clone)]
pub struct RegionFilter {
    band: AreaBand,
}

impl RegionFilter {
    pub fn new(band: AreaBand) -> RegionFilter {
        RegionFilter { band }
    }

    pub fn get_band(&self) -> AreaBand {
        self.band
    }

    pub fn filter(&self, mask: &BinaryMask) -> BinaryMask {
        let resolution = mask.get_resolution();
        let source = mask.get_internal_data();
        let (height, width) = source.dim();
        let mut visited = Array2::<bool>::from_elem((height, width), false);
        let mut output = BinaryMask::new(resolution);

        let mut flood_stack: Vec<(usize, usize)> = Vec::new();
        let mut component: Vec<(usize, usize)> = Vec::new();

        for seed_y in 0..height {
            for seed_x in 0..width {
                if source[(seed_y, seed_x)] == 0 || visited[(seed_y, seed_x)] {
                    continue;
                }

                component.clear();
                let mut bounds = ComponentBounds::new(seed_y, seed_x);
                visited[(seed_y, seed_x)] = true;
                flood_stack.push((seed_y, seed_x));
                while let Some((y, x)) = flood_stack.pop() {
                    component.push((y, x));
                    bounds.include(y, x);
                    for (ny, nx) in eight_neighbors(y, x, height, width) {
                        if source[(ny, nx)] != 0 && !visited[(ny, nx)] {
                            visited[(ny, nx)] = true;
                            flood_stack.push((ny, nx));
                        }
                    }
                }

                let filled = fill_component_interior(&component, &bounds);
                if self.band.contains(filled.len()) {
                    let cells = output.get_internal_data_mut();
                    for &(y, x) in &filled {
                        cells[(y, x)] = MASK_FOREGROUND;
                    }
                }
            }
        }

        output
    }
}

impl std::fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "RegionFilter(band: {})", self.band)
    }
}

//region component geometry

#[derive(Debug, Clone, Copy)]
struct ComponentBounds {
    min_y: usize,
    min_x: usize,
    max_y: usize,
    max_x: usize,
}

impl ComponentBounds {
    fn new(y: usize, x: usize) -> ComponentBounds {
        ComponentBounds {
            min_y: y,
            min_x: x,
            max_y: y,
            max_x: x,
        }
    }

    fn include(&mut self, y: usize, x: usize) {
        self.min_y = self.min_y.min(y);
        self.min_x = self.min_x.min(x);
        self.max_y = self.max_y.max(y);
        self.max_x = self.max_x.max(x);
    }
}

fn eight_neighbors(
    y: usize,
    x: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    OFFSETS.iter().filter_map(move |&(dy, dx)| {
        let ny = y as isize + dy;
        let nx = x as isize + dx;
        if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
            None
        } else {
            Some((ny as usize, nx as usize))
        }
    })
}

/// Fills the component's enclosed interior. Works inside the component's
/// bounding box with a one-cell pad; background connected to the pad is
/// outside, everything else is either the component or a hole it encloses.
/// Background flooding is 4-connected, the dual of 8-connected foreground.
fn fill_component_interior(
    component: &[(usize, usize)],
    bounds: &ComponentBounds,
) -> Vec<(usize, usize)> {
    const UNKNOWN: u8 = 0;
    const FOREGROUND: u8 = 1;
    const OUTSIDE: u8 = 2;

    let window_height = bounds.max_y - bounds.min_y + 3;
    let window_width = bounds.max_x - bounds.min_x + 3;
    let mut window = Array2::<u8>::from_elem((window_height, window_width), UNKNOWN);
    for &(y, x) in component {
        window[(y - bounds.min_y + 1, x - bounds.min_x + 1)] = FOREGROUND;
    }

    let mut flood_stack: Vec<(usize, usize)> = vec![(0, 0)];
    window[(0, 0)] = OUTSIDE;
    while let Some((y, x)) = flood_stack.pop() {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        for (dy, dx) in OFFSETS {
            let ny = y as isize + dy;
            let nx = x as isize + dx;
            if ny < 0 || nx < 0 || ny >= window_height as isize || nx >= window_width as isize {
                continue;
            }
            if window[(ny as usize, nx as usize)] == UNKNOWN {
                window[(ny as usize, nx as usize)] = OUTSIDE;
                flood_stack.push((ny as usize, nx as usize));
            }
        }
    }

    let mut filled = Vec::with_capacity(component.len());
    for window_y in 1..window_height - 1 {
        for window_x in 1..window_width - 1 {
            if window[(window_y, window_x)] != OUTSIDE {
                filled.push((
                    window_y + bounds.min_y - 1,
                    window_x + bounds.min_x - 1,
                ));
            }
        }
    }
    filled
}

//endregion
