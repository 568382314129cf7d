//! Measurement projections
//!
//! Every measurement flattens its owning person to an identifier plus
//! display name. Rebuilding keeps the identifier as written; the display
//! name is informational.

use super::Projection;
use crate::core::reference::{ReferenceKind, ReferenceSession};
use crate::domain::{
    BeverageConsumptionMeasurement, BeverageMeasure, BloodGlucoseMeasurement,
    BloodOxygenSaturationMeasurement, BloodPressureMeasurement, CholesterolMeasurement,
    ExchangeError, ExerciseMeasurement, MealConsumptionMeasurement, Result, WeightMeasurement,
};
use crate::records::{
    BeverageConsumptionRecord, BloodGlucoseRecord, BloodOxygenSaturationRecord,
    BloodPressureRecord, CholesterolRecord, ExerciseRecord, MealConsumptionRecord, Nutrition,
    WeightRecord,
};

const PEOPLE: &[ReferenceKind] = &[ReferenceKind::People];

fn person_name(refs: &ReferenceSession, person_id: i64) -> Result<String> {
    Ok(refs.people.find_by_id(person_id)?.display_name())
}

impl Projection for WeightMeasurement {
    type Flat = WeightRecord;

    fn references() -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<WeightRecord> {
        Ok(WeightRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            weight: self.weight,
            bmi: self.bmi,
            assessment: self.bmi_assessment.clone(),
            bmr: self.bmr,
        })
    }

    fn from_flat(flat: &WeightRecord, _refs: &ReferenceSession) -> Result<Self> {
        Ok(WeightMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            weight: flat.weight,
            bmi: flat.bmi,
            bmi_assessment: flat.assessment.clone(),
            bmr: flat.bmr,
        })
    }
}

impl Projection for BloodPressureMeasurement {
    type Flat = BloodPressureRecord;

    fn references() -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<BloodPressureRecord> {
        Ok(BloodPressureRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            systolic: self.systolic,
            diastolic: self.diastolic,
            assessment: self.assessment.clone(),
        })
    }

    fn from_flat(flat: &BloodPressureRecord, _refs: &ReferenceSession) -> Result<Self> {
        Ok(BloodPressureMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            systolic: flat.systolic,
            diastolic: flat.diastolic,
            assessment: flat.assessment.clone(),
        })
    }
}

impl Projection for BloodGlucoseMeasurement {
    type Flat = BloodGlucoseRecord;

    fn references() -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<BloodGlucoseRecord> {
        Ok(BloodGlucoseRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            level: self.level,
            assessment: self.assessment.clone(),
        })
    }

    fn from_flat(flat: &BloodGlucoseRecord, _refs: &ReferenceSession) -> Result<Self> {
        Ok(BloodGlucoseMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            level: flat.level,
            assessment: flat.assessment.clone(),
        })
    }
}

impl Projection for BloodOxygenSaturationMeasurement {
    type Flat = BloodOxygenSaturationRecord;

    fn references() -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<BloodOxygenSaturationRecord> {
        Ok(BloodOxygenSaturationRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            percentage: self.percentage,
            assessment: self.assessment.clone(),
        })
    }

    fn from_flat(flat: &BloodOxygenSaturationRecord, _refs: &ReferenceSession) -> Result<Self> {
        Ok(BloodOxygenSaturationMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            percentage: flat.percentage,
            assessment: flat.assessment.clone(),
        })
    }
}

impl Projection for CholesterolMeasurement {
    type Flat = CholesterolRecord;

    fn references() -> &'static [ReferenceKind] {
        PEOPLE
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<CholesterolRecord> {
        Ok(CholesterolRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            total: self.total,
            hdl: self.hdl,
            ldl: self.ldl,
            triglycerides: self.triglycerides,
        })
    }

    fn from_flat(flat: &CholesterolRecord, _refs: &ReferenceSession) -> Result<Self> {
        Ok(CholesterolMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            total: flat.total,
            hdl: flat.hdl,
            ldl: flat.ldl,
            triglycerides: flat.triglycerides,
        })
    }
}

impl Projection for ExerciseMeasurement {
    type Flat = ExerciseRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::People, ReferenceKind::ActivityTypes]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<ExerciseRecord> {
        let activity_type = refs.activity_types.find_by_id(self.activity_type_id)?;
        Ok(ExerciseRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            activity_type: activity_type.description.clone(),
            duration: self.duration,
            distance: self.distance,
            calories: self.calories,
            minimum_heart_rate: self.minimum_heart_rate,
            maximum_heart_rate: self.maximum_heart_rate,
        })
    }

    fn from_flat(flat: &ExerciseRecord, refs: &ReferenceSession) -> Result<Self> {
        let activity_type = refs.activity_types.find_by_name(&flat.activity_type)?;
        Ok(ExerciseMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            activity_type_id: activity_type.id,
            duration: flat.duration,
            distance: flat.distance,
            calories: flat.calories,
            minimum_heart_rate: flat.minimum_heart_rate,
            maximum_heart_rate: flat.maximum_heart_rate,
        })
    }
}

impl Projection for BeverageConsumptionMeasurement {
    type Flat = BeverageConsumptionRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::People, ReferenceKind::Beverages]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<BeverageConsumptionRecord> {
        let beverage = refs.beverages.find_by_id(self.beverage_id)?;
        Ok(BeverageConsumptionRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            beverage_id: beverage.id,
            beverage: beverage.name.clone(),
            measure: self.measure.code(),
            measure_name: self.measure.to_string(),
            quantity: self.quantity,
            volume: self.volume,
            abv: self.abv,
            units: self.units,
        })
    }

    fn from_flat(flat: &BeverageConsumptionRecord, refs: &ReferenceSession) -> Result<Self> {
        let beverage = refs.beverages.find_by_name(&flat.beverage)?;
        let measure = BeverageMeasure::from_code(flat.measure)
            .ok_or_else(|| ExchangeError::not_found("Beverage measure", flat.measure))?;
        Ok(BeverageConsumptionMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            beverage_id: beverage.id,
            measure,
            quantity: flat.quantity,
            volume: flat.volume,
            abv: flat.abv,
            units: flat.units,
        })
    }
}

impl Projection for MealConsumptionMeasurement {
    type Flat = MealConsumptionRecord;

    fn references() -> &'static [ReferenceKind] {
        &[ReferenceKind::People, ReferenceKind::Meals]
    }

    fn to_flat(&self, refs: &ReferenceSession) -> Result<MealConsumptionRecord> {
        let meal = refs.meals.find_by_id(self.meal_id)?;
        Ok(MealConsumptionRecord {
            person_id: self.person_id,
            name: person_name(refs, self.person_id)?,
            date: self.date,
            meal_id: meal.id,
            meal: meal.name.clone(),
            quantity: self.quantity,
            nutrition: Nutrition::from_value(self.nutritional_value.as_ref()),
        })
    }

    fn from_flat(flat: &MealConsumptionRecord, refs: &ReferenceSession) -> Result<Self> {
        let meal = refs.meals.find_by_name(&flat.meal)?;
        Ok(MealConsumptionMeasurement {
            id: 0,
            person_id: flat.person_id,
            date: flat.date,
            meal_id: meal.id,
            quantity: flat.quantity,
            nutritional_value_id: None,
            nutritional_value: flat.nutrition.to_optional_value(),
        })
    }
}
