pub mod capex;
pub mod characteristics;
pub mod cogp;
pub mod crop;
pub mod cycles;
pub mod deliverables;
pub mod energy;
pub mod labor;
pub mod land_status;
pub mod opex;
pub mod rent;
pub mod sizing;
pub mod water;
pub mod wastage;

pub use capex::SoilCapexOverview;
pub use characteristics::SoilCropCharacteristics;
pub use cogp::SoilCogp;
pub use crop::SoilCrop;
pub use cycles::SoilCropCycles;
pub use deliverables::SoilDeliverables;
pub use energy::SoilEnergy;
pub use labor::SoilLabor;
pub use land_status::SoilLandStatus;
pub use opex::SoilOpexOverview;
pub use rent::SoilRent;
pub use sizing::SoilSizingArea;
pub use water::SoilWater;
pub use wastage::SoilWastage;
