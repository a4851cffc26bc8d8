//! Registro cerrado de modelos.
//!
//! El despacho por nombre se resuelve sobre un sum type exhaustivo en lugar de
//! un mapa string → clase: un nombre nuevo obliga a tocar este enum y el
//! compilador señala todos los puntos de despacho.

use agro_core::{Model, ModelError};

use crate::financials::{FinancialsEmployees, FinancialsInterest, FinancialsMain, FinancialsPopulationFed};
use crate::soil::{SoilCapexOverview, SoilCogp, SoilCrop, SoilCropCharacteristics, SoilCropCycles,
                  SoilDeliverables, SoilEnergy, SoilLabor, SoilLandStatus, SoilOpexOverview, SoilRent,
                  SoilSizingArea, SoilWastage, SoilWater};
use crate::util::CropGrowSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    CropGrowSystem,
    FinancialsInterest,
    FinancialsMain,
    FinancialsEmployees,
    FinancialsPopulationFed,
    SoilLandStatus,
    SoilSizingArea,
    SoilCropCharacteristics,
    SoilCropCycles,
    SoilCrop,
    SoilWastage,
    SoilRent,
    SoilWater,
    SoilEnergy,
    SoilLabor,
    SoilCogp,
    SoilCapexOverview,
    SoilOpexOverview,
    SoilDeliverables,
}

impl ModelId {
    pub const ALL: &'static [ModelId] = &[ModelId::CropGrowSystem,
                                          ModelId::FinancialsInterest,
                                          ModelId::FinancialsMain,
                                          ModelId::FinancialsEmployees,
                                          ModelId::FinancialsPopulationFed,
                                          ModelId::SoilLandStatus,
                                          ModelId::SoilSizingArea,
                                          ModelId::SoilCropCharacteristics,
                                          ModelId::SoilCropCycles,
                                          ModelId::SoilCrop,
                                          ModelId::SoilWastage,
                                          ModelId::SoilRent,
                                          ModelId::SoilWater,
                                          ModelId::SoilEnergy,
                                          ModelId::SoilLabor,
                                          ModelId::SoilCogp,
                                          ModelId::SoilCapexOverview,
                                          ModelId::SoilOpexOverview,
                                          ModelId::SoilDeliverables];

    pub fn from_name(name: &str) -> Result<ModelId, ModelError> {
        match name {
            "crop_grow_system" => Ok(ModelId::CropGrowSystem),
            "financials_interest" => Ok(ModelId::FinancialsInterest),
            "financials_main" => Ok(ModelId::FinancialsMain),
            "financials_employees" => Ok(ModelId::FinancialsEmployees),
            "financials_population_fed" => Ok(ModelId::FinancialsPopulationFed),
            "soil_input_land_status" => Ok(ModelId::SoilLandStatus),
            "soil_sizing_area" => Ok(ModelId::SoilSizingArea),
            "soil_crop_characteristics" => Ok(ModelId::SoilCropCharacteristics),
            "soil_crop_cycles" => Ok(ModelId::SoilCropCycles),
            "soil_crop" => Ok(ModelId::SoilCrop),
            "soil_wastage" => Ok(ModelId::SoilWastage),
            "soil_rent" => Ok(ModelId::SoilRent),
            "soil_water" => Ok(ModelId::SoilWater),
            "soil_energy" => Ok(ModelId::SoilEnergy),
            "soil_labor" => Ok(ModelId::SoilLabor),
            "soil_cogp" => Ok(ModelId::SoilCogp),
            "soil_capex_overview" => Ok(ModelId::SoilCapexOverview),
            "soil_opex_overview" => Ok(ModelId::SoilOpexOverview),
            "soil_deliverables" => Ok(ModelId::SoilDeliverables),
            other => Err(ModelError::UnknownField(format!("model name not found: {other}"))),
        }
    }

    pub fn model(&self) -> &'static dyn Model {
        match self {
            ModelId::CropGrowSystem => &CropGrowSystem,
            ModelId::FinancialsInterest => &FinancialsInterest,
            ModelId::FinancialsMain => &FinancialsMain,
            ModelId::FinancialsEmployees => &FinancialsEmployees,
            ModelId::FinancialsPopulationFed => &FinancialsPopulationFed,
            ModelId::SoilLandStatus => &SoilLandStatus,
            ModelId::SoilSizingArea => &SoilSizingArea,
            ModelId::SoilCropCharacteristics => &SoilCropCharacteristics,
            ModelId::SoilCropCycles => &SoilCropCycles,
            ModelId::SoilCrop => &SoilCrop,
            ModelId::SoilWastage => &SoilWastage,
            ModelId::SoilRent => &SoilRent,
            ModelId::SoilWater => &SoilWater,
            ModelId::SoilEnergy => &SoilEnergy,
            ModelId::SoilLabor => &SoilLabor,
            ModelId::SoilCogp => &SoilCogp,
            ModelId::SoilCapexOverview => &SoilCapexOverview,
            ModelId::SoilOpexOverview => &SoilOpexOverview,
            ModelId::SoilDeliverables => &SoilDeliverables,
        }
    }

    pub fn name(&self) -> &'static str {
        self.model().info().name
    }
}
