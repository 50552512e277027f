//! Assign data cells to the color of the closest sample group.

use serde::{Deserialize, Serialize};

use crate::color::{hue_distance, ColorClass};
use crate::ClassifyError;

/// Methodology used to classify data cells against sample cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Nearest group median on the hue circle.
    #[default]
    Median,
    /// Reserved; not implemented.
    MaxLikelihood,
}

/// What the classifier needs to know about one cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HueSample {
    pub hue: f32,
    pub class: ColorClass,
}

/// Sample cells sharing one color class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExemplarGroup {
    pub class: ColorClass,
    /// Circular median of the members' mean hues.
    pub median_hue: f32,
    /// Indices into the sample slice.
    pub members: Vec<usize>,
}

/// Data-cell labels produced by the exemplar classifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub groups: Vec<ExemplarGroup>,
    /// Group index for every data cell, in data order.
    pub association: Vec<usize>,
}

impl Classification {
    /// Color class of every data cell, in data order.
    ///
    /// An association pointing at no group yields [`ColorClass::NONE`].
    pub fn classes(&self) -> Vec<ColorClass> {
        self.association
            .iter()
            .map(|&g| self.groups.get(g).map_or(ColorClass::NONE, |grp| grp.class))
            .collect()
    }
}

impl ClassifierKind {
    /// Label every data cell. `samples` must already exclude any reserved
    /// marker cell.
    pub fn classify(
        self,
        samples: &[HueSample],
        data: &[HueSample],
    ) -> Result<Classification, ClassifyError> {
        match self {
            ClassifierKind::Median => classify_median(samples, data),
            ClassifierKind::MaxLikelihood => Err(ClassifyError::NotImplemented(self)),
        }
    }
}

fn median(values: &mut [f32]) -> f32 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        0.5 * (values[n / 2 - 1] + values[n / 2])
    }
}

/// Median on the hue circle, in `[0, 360)`.
///
/// Hues are unwrapped onto the arc within ±180° of the first one before
/// sorting, so a group spanning 0° (red) stays contiguous.
pub fn circular_median(hues: &[f32]) -> Option<f32> {
    let &anchor = hues.first()?;
    let mut unwrapped: Vec<f32> = hues
        .iter()
        .map(|&h| {
            let d = (h - anchor).rem_euclid(360.0);
            anchor + if d > 180.0 { d - 360.0 } else { d }
        })
        .collect();
    let m = median(&mut unwrapped).rem_euclid(360.0);
    Some(if m >= 360.0 { 0.0 } else { m })
}

/// Groups are ordered by first appearance among the samples.
pub fn group_samples(samples: &[HueSample]) -> Vec<ExemplarGroup> {
    let mut groups: Vec<ExemplarGroup> = Vec::new();
    for (i, s) in samples.iter().enumerate() {
        match groups.iter_mut().find(|g| g.class == s.class) {
            Some(g) => g.members.push(i),
            None => groups.push(ExemplarGroup {
                class: s.class,
                median_hue: 0.0,
                members: vec![i],
            }),
        }
    }
    for g in &mut groups {
        let hues: Vec<f32> = g.members.iter().map(|&i| samples[i].hue).collect();
        g.median_hue = circular_median(&hues).unwrap_or(0.0);
    }
    groups
}

fn classify_median(
    samples: &[HueSample],
    data: &[HueSample],
) -> Result<Classification, ClassifyError> {
    let groups = group_samples(samples);
    if groups.is_empty() {
        return Err(ClassifyError::NoExemplars);
    }

    let association = data
        .iter()
        .map(|d| {
            let mut best = 0;
            let mut best_dist = f32::INFINITY;
            for (gi, g) in groups.iter().enumerate() {
                let dist = hue_distance(d.hue, g.median_hue);
                if dist < best_dist {
                    best = gi;
                    best_dist = dist;
                }
            }
            best
        })
        .collect();

    Ok(Classification {
        groups,
        association,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(hue: f32, class: ColorClass) -> HueSample {
        HueSample { hue, class }
    }

    #[test]
    fn groups_by_class_with_median() {
        let samples = [
            s(10.0, ColorClass::RED),
            s(60.0, ColorClass::YELLOW),
            s(20.0, ColorClass::RED),
            s(300.0, ColorClass::MAGENTA),
            s(16.0, ColorClass::RED),
            s(70.0, ColorClass::YELLOW),
        ];
        let groups = group_samples(&samples);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].class, ColorClass::RED);
        assert_eq!(groups[0].members, vec![0, 2, 4]);
        assert_eq!(groups[0].median_hue, 16.0);
        assert_eq!(groups[1].median_hue, 65.0);
        assert_eq!(groups[2].class, ColorClass::MAGENTA);
    }

    #[test]
    fn nearest_median_wins_across_zero() {
        let samples = [
            s(5.0, ColorClass::RED),
            s(65.0, ColorClass::YELLOW),
            s(310.0, ColorClass::MAGENTA),
        ];
        let data = [
            s(355.0, ColorClass::RED),
            s(40.0, ColorClass::YELLOW),
            s(330.0, ColorClass::MAGENTA),
            s(150.0, ColorClass::GREEN),
        ];
        let out = ClassifierKind::Median
            .classify(&samples, &data)
            .expect("classified");
        assert_eq!(out.association, vec![0, 1, 2, 1]);
        assert_eq!(
            out.classes(),
            vec![
                ColorClass::RED,
                ColorClass::YELLOW,
                ColorClass::MAGENTA,
                ColorClass::YELLOW
            ]
        );
    }

    #[test]
    fn red_group_median_wraps_through_zero() {
        let samples = [
            s(355.0, ColorClass::RED),
            s(60.0, ColorClass::YELLOW),
            s(5.0, ColorClass::RED),
            s(310.0, ColorClass::MAGENTA),
        ];
        let groups = group_samples(&samples);
        assert_eq!(groups[0].class, ColorClass::RED);
        assert!(hue_distance(groups[0].median_hue, 0.0) < 1e-3, "{}", groups[0].median_hue);

        let data = [s(0.0, ColorClass::RED), s(350.0, ColorClass::RED)];
        let out = ClassifierKind::Median.classify(&samples, &data).expect("ok");
        assert_eq!(out.classes(), vec![ColorClass::RED, ColorClass::RED]);
    }

    #[test]
    fn circular_median_of_odd_and_even_sets() {
        assert_eq!(circular_median(&[]), None);
        assert_eq!(circular_median(&[358.0, 2.0, 4.0]), Some(2.0));
        assert_eq!(circular_median(&[350.0, 354.0, 358.0]), Some(354.0));
        assert_eq!(circular_median(&[60.0, 70.0]), Some(65.0));
        let m = circular_median(&[2.0, 356.0]).expect("median");
        assert!(hue_distance(m, 359.0) < 1e-3, "{m}");
    }

    #[test]
    fn every_data_cell_gets_exactly_one_label() {
        let samples = [s(0.0, ColorClass::RED), s(120.0, ColorClass::GREEN)];
        let data: Vec<HueSample> = (0..36)
            .map(|i| s(i as f32 * 10.0, ColorClass::NONE))
            .collect();
        let out = ClassifierKind::Median.classify(&samples, &data).expect("ok");
        assert_eq!(out.association.len(), data.len());
        assert!(out.association.iter().all(|&g| g < 2));
        // 60° is equidistant; the earlier group wins.
        assert_eq!(out.association[6], 0);
    }

    #[test]
    fn unsupported_methodology_and_empty_samples() {
        let data = [s(10.0, ColorClass::RED)];
        assert_eq!(
            ClassifierKind::MaxLikelihood.classify(&data, &data),
            Err(ClassifyError::NotImplemented(ClassifierKind::MaxLikelihood))
        );
        assert_eq!(
            ClassifierKind::Median.classify(&[], &data),
            Err(ClassifyError::NoExemplars)
        );
    }
}
