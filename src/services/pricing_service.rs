//! Cálculo del precio de un viaje
//!
//! El precio se fija al crear el viaje y no cambia después. La tarifa
//! actual es provisional: un entero aleatorio en un rango fijo.

use rand::Rng;
use rust_decimal::Decimal;

/// Función de precio: ruta → importe no negativo.
pub trait PricingStrategy: Send + Sync {
    fn quote(&self, from_zone: &str, to_zone: &str) -> Decimal;
}

/// Tarifa provisional: entero aleatorio en `[min, max)`.
#[derive(Debug, Clone)]
pub struct RandomZonePricing {
    min: u32,
    max: u32,
}

impl RandomZonePricing {
    /// Un rango vacío se ensancha para que contenga al menos un valor.
    pub fn new(min: u32, max: u32) -> Self {
        let max = max.max(min.saturating_add(1));
        Self {
            min: min.min(max - 1),
            max,
        }
    }
}

impl Default for RandomZonePricing {
    fn default() -> Self {
        Self::new(10, 60)
    }
}

impl PricingStrategy for RandomZonePricing {
    fn quote(&self, _from_zone: &str, _to_zone: &str) -> Decimal {
        let amount = rand::thread_rng().gen_range(self.min..self.max);
        Decimal::from(amount)
    }
}

/// Tarifa plana, independiente de la ruta.
#[derive(Debug, Clone)]
pub struct FixedPricing(pub Decimal);

impl PricingStrategy for FixedPricing {
    fn quote(&self, _from_zone: &str, _to_zone: &str) -> Decimal {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pricing_stays_in_range() {
        let pricing = RandomZonePricing::default();
        for _ in 0..200 {
            let price = pricing.quote("Z1", "Z2");
            assert!(price >= Decimal::from(10));
            assert!(price < Decimal::from(60));
        }
    }

    #[test]
    fn test_range_at_upper_bound_does_not_overflow() {
        let pricing = RandomZonePricing::new(u32::MAX, u32::MAX);
        assert_eq!(pricing.quote("A", "B"), Decimal::from(u32::MAX - 1));
    }

    #[test]
    fn test_degenerate_range_is_widened() {
        let pricing = RandomZonePricing::new(5, 5);
        assert_eq!(pricing.quote("A", "B"), Decimal::from(5));
    }
}
