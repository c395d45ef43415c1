use std::collections::HashMap;

/// An RGB color with components in `[0, 1]`, the convention molecular
/// drawing backends take highlight colors in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Convert from HSV, all components in `[0, 1]`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let sector = h.floor() as u8 % 6;
        let f = h - h.floor();
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }
}

/// Atom and bond highlight colors on the display molecule.
///
/// Built fresh for each analysis request. Color assignment is
/// first-writer-wins: the first match to touch an atom or bond fixes its
/// color, so shared atoms keep a stable color across overlapping matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightPlan {
    pub atom_colors: HashMap<usize, Color>,
    pub bond_colors: HashMap<usize, Color>,
}

impl HighlightPlan {
    pub fn is_empty(&self) -> bool {
        self.atom_colors.is_empty() && self.bond_colors.is_empty()
    }

    /// Highlighted atom indices, sorted for stable iteration.
    pub fn atoms(&self) -> Vec<usize> {
        let mut atoms: Vec<usize> = self.atom_colors.keys().copied().collect();
        atoms.sort_unstable();
        atoms
    }

    /// Highlighted bond indices, sorted for stable iteration.
    pub fn bonds(&self) -> Vec<usize> {
        let mut bonds: Vec<usize> = self.bond_colors.keys().copied().collect();
        bonds.sort_unstable();
        bonds
    }

    /// Assign `color` to an atom unless an earlier match already claimed it.
    pub fn paint_atom(&mut self, atom: usize, color: Color) {
        self.atom_colors.entry(atom).or_insert(color);
    }

    /// Assign `color` to a bond unless an earlier match already claimed it.
    pub fn paint_bond(&mut self, bond: usize, color: Color) {
        self.bond_colors.entry(bond).or_insert(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins_per_atom_and_bond() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.4, 1.0);

        let mut plan = HighlightPlan::default();
        plan.paint_atom(3, red);
        plan.paint_atom(3, blue);
        plan.paint_bond(0, blue);
        plan.paint_bond(0, red);

        assert_eq!(plan.atom_colors[&3], red);
        assert_eq!(plan.bond_colors[&0], blue);
    }

    #[test]
    fn sorted_index_accessors() {
        let color = Color::new(0.0, 0.8, 0.0);
        let mut plan = HighlightPlan::default();
        for atom in [5, 1, 3] {
            plan.paint_atom(atom, color);
        }
        assert_eq!(plan.atoms(), vec![1, 3, 5]);
        assert!(plan.bonds().is_empty());
    }

    #[test]
    fn hsv_primaries_convert_exactly() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::new(1.0, 0.0, 0.0));
        let green = Color::from_hsv(1.0 / 3.0, 1.0, 1.0);
        assert!((green.g - 1.0).abs() < 1e-9 && green.r.abs() < 1e-9);
        // Zero saturation is grayscale at the value level.
        assert_eq!(Color::from_hsv(0.42, 0.0, 0.5), Color::new(0.5, 0.5, 0.5));
    }
}
