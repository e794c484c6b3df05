//! PP-006: Primitive catalog: descriptors of the engine primitives we emit.

use super::types::{Primitive, PrimitiveStep};

/// Static primitive descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveInfo {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub python_path: &'static str,
}

impl PrimitiveInfo {
    pub fn to_primitive(&self) -> Primitive {
        Primitive {
            id: self.id.to_string(),
            version: self.version.to_string(),
            name: self.name.to_string(),
            python_path: self.python_path.to_string(),
            digest: None,
        }
    }

    /// A step invoking this primitive with default outputs and no hyperparameters.
    pub fn step(&self) -> PrimitiveStep {
        PrimitiveStep::new(self.to_primitive())
    }
}

// -- Dataset plumbing --

pub const UPDATE_SEMANTIC_TYPES: PrimitiveInfo = PrimitiveInfo {
    id: "98c79128-555a-4a6b-85fb-d4f4064c94ab",
    version: "0.2.0",
    name: "Semantic type updater",
    python_path: "d3m.primitives.data_transformation.update_semantic_types.DatasetCommon",
};

pub const REMOVE_COLUMNS: PrimitiveInfo = PrimitiveInfo {
    id: "2eeff053-395a-497d-88db-7374c27812e6",
    version: "0.2.0",
    name: "Column remover",
    python_path: "d3m.primitives.data_transformation.remove_columns.DatasetCommon",
};

pub const DENORMALIZE: PrimitiveInfo = PrimitiveInfo {
    id: "f31f8c1f-d1c5-43e5-a4b2-2ae4a761ef2e",
    version: "0.2.0",
    name: "Denormalize datasets",
    python_path: "d3m.primitives.data_transformation.denormalize.Common",
};

pub const DATASET_TO_DATAFRAME: PrimitiveInfo = PrimitiveInfo {
    id: "4b42ce1e-9b98-4a25-b68e-fad13311eb65",
    version: "0.3.0",
    name: "Extract a DataFrame from a Dataset",
    python_path: "d3m.primitives.data_transformation.dataset_to_dataframe.Common",
};

pub const COLUMN_PARSER: PrimitiveInfo = PrimitiveInfo {
    id: "d510cb7a-1782-4f51-b44c-58f0236e47c7",
    version: "0.5.0",
    name: "Parses strings into their types",
    python_path: "d3m.primitives.data_transformation.column_parser.Common",
};

// -- Analysis primitives --

pub const PCA_FEATURES: PrimitiveInfo = PrimitiveInfo {
    id: "04573880-d64f-4791-8932-52b7c3877639",
    version: "3.0.1",
    name: "PCA Features",
    python_path: "d3m.primitives.feature_selection.pca_features.Pcafeatures",
};

pub const SIMON: PrimitiveInfo = PrimitiveInfo {
    id: "d2fa8df2-6517-3c26-bafc-87b701c4043a",
    version: "1.2.2",
    name: "simon",
    python_path: "d3m.primitives.data_cleaning.column_type_profiler.Simon",
};

pub const CROC: PrimitiveInfo = PrimitiveInfo {
    id: "404fae2a-2f0a-4c9b-9ad2-fb1528990561",
    version: "1.2.3",
    name: "croc",
    python_path: "d3m.primitives.digital_image_processing.croc.Croc",
};

pub const DATA_CLEANING: PrimitiveInfo = PrimitiveInfo {
    id: "fc6bf33a-f3e0-3496-aa47-9a40289661bc",
    version: "3.0.1",
    name: "Data cleaning",
    python_path: "d3m.primitives.data_cleaning.data_cleaning.Datacleaning",
};

pub const UNICORN: PrimitiveInfo = PrimitiveInfo {
    id: "475c26dc-eb2e-43d3-acdb-159b80d9f099",
    version: "1.1.1",
    name: "unicorn",
    python_path: "d3m.primitives.digital_image_processing.unicorn.Unicorn",
};

pub const TIMESERIES_LOADER: PrimitiveInfo = PrimitiveInfo {
    id: "1689aafa-16dc-4c55-8ad4-76cadcf46086",
    version: "0.1.0",
    name: "Time series loader",
    python_path: "d3m.primitives.data_preprocessing.timeseries_loader.DistilTimeSeriesLoader",
};

pub const SLOTH: PrimitiveInfo = PrimitiveInfo {
    id: "77bf4b92-2faa-3e38-bb7e-804131243a7f",
    version: "2.0.5",
    name: "Sloth",
    python_path: "d3m.primitives.time_series_segmentation.cluster.Sloth",
};

pub const DUKE: PrimitiveInfo = PrimitiveInfo {
    id: "46612a42-6120-3559-9db9-3aa9a76eb94f",
    version: "1.1.6",
    name: "duke",
    python_path: "d3m.primitives.data_cleaning.text_summarization.Duke",
};

pub const TARGET_RANKING: PrimitiveInfo = PrimitiveInfo {
    id: "a31b0c26-cca8-4d54-95b9-886e23df8886",
    version: "0.1.0",
    name: "Mutual Information Feature Ranking",
    python_path: "d3m.primitives.feature_selection.mutual_info_classif.DistilMIRanking",
};

pub const GOAT_FORWARD: PrimitiveInfo = PrimitiveInfo {
    id: "c7c61da3-cf57-354e-8841-664853370106",
    version: "1.0.7",
    name: "Goat_forward",
    python_path: "d3m.primitives.data_cleaning.geocoding.Goat_forward",
};

pub const GOAT_REVERSE: PrimitiveInfo = PrimitiveInfo {
    id: "f6e4880b-98c7-32f0-b687-a4b1d74c8f99",
    version: "1.0.7",
    name: "Goat_reverse",
    python_path: "d3m.primitives.data_cleaning.geocoding.Goat_reverse",
};

pub const JOIN: PrimitiveInfo = PrimitiveInfo {
    id: "6c3188bf-322d-4f9b-bb91-68151bf1f17f",
    version: "0.1.0",
    name: "Fuzzy Join Placeholder",
    python_path: "d3m.primitives.data_transformation.fuzzy_join.DistilFuzzyJoin",
};

pub const TIMESERIES_FORMATTER: PrimitiveInfo = PrimitiveInfo {
    id: "1c4aed23-f3d3-4e6b-9710-009a9bc9b694",
    version: "0.1.0",
    name: "Time series formatter",
    python_path: "d3m.primitives.data_transformation.time_series_formatter.DistilTimeSeriesFormatter",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pp006_to_primitive() {
        let p = REMOVE_COLUMNS.to_primitive();
        assert_eq!(p.id, "2eeff053-395a-497d-88db-7374c27812e6");
        assert!(p.python_path.ends_with("remove_columns.DatasetCommon"));
        assert!(p.digest.is_none());
    }

    #[test]
    fn test_pp006_step_defaults() {
        let s = DUKE.step();
        assert_eq!(s.outputs, vec!["produce"]);
        assert!(s.hyperparams.is_empty());
        assert!(s.arguments.is_empty());
    }
}
