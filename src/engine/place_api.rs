use super::helpers::parse_decimal;
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlaceAPI,
    entities::{Poi, PoiConfidence},
    error::{not_found_error, upstream_error, Error},
    external::types::WirePoi,
};

/// Category tags in preference order; earlier entries weigh more.
pub const CATEGORY_PRIORITIES: &[&str] = &[
    "风景名胜",
    "旅游景点",
    "公园广场",
    "博物馆",
    "纪念馆",
    "文化场馆",
    "宗教场所",
    "古迹遗址",
    "娱乐休闲",
    "购物服务",
    "餐饮服务",
    "商务住宅",
    "地名地址",
    "交通设施",
];

const LANDMARK_KEYWORDS: &[&str] = &[
    "景区", "公园", "博物馆", "博物院", "纪念馆", "故宫", "广场", "寺", "塔", "山", "湖", "古镇",
    "遗址",
];

const ADDRESS_KEYWORDS: &[&str] = &[
    "省", "市", "区", "县", "镇", "村", "路", "街", "公园", "山", "寺", "city", "district", "road",
    "street", "park", "mountain", "temple",
];

const CATEGORY_WEIGHT: f64 = 10.0;
const RATING_WEIGHT: f64 = 10.0;
const LANDMARK_BONUS: f64 = 15.0;

/// Scores a POI by its best matching category, its rating and landmark
/// words in its name. A POI outside every category scores 0.
pub fn score(poi: &Poi, priorities: &[&str]) -> f64 {
    let rank = match priorities.iter().position(|c| poi.kind.contains(c)) {
        Some(rank) => rank,
        None => return 0.0,
    };

    let landmarks = LANDMARK_KEYWORDS
        .iter()
        .filter(|keyword| poi.name.contains(*keyword))
        .count();

    (priorities.len() - rank) as f64 * CATEGORY_WEIGHT
        + poi.rating.unwrap_or(0.0) * RATING_WEIGHT
        + landmarks as f64 * LANDMARK_BONUS
}

/// Index of the highest-scoring POI. Ties keep the earliest in input order;
/// `None` when nothing scores above zero.
pub fn select_best(pois: &[Poi], priorities: &[&str]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, poi) in pois.iter().enumerate() {
        let score = score(poi, priorities);
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

pub fn looks_like_address(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    ADDRESS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn to_poi(wire: &WirePoi) -> Poi {
    Poi {
        name: wire.name.clone(),
        address: wire.address.clone(),
        kind: wire.kind.clone(),
        coordinates: wire.location.parse().ok(),
        // municipalities leave the city name empty
        city: [&wire.cityname, &wire.pname]
            .into_iter()
            .find(|name| !name.is_empty())
            .cloned()
            .unwrap_or_default(),
        phone: wire.tel.clone(),
        rating: parse_decimal(&wire.biz_ext.rating),
        cost: parse_decimal(&wire.biz_ext.cost),
        confidence: PoiConfidence::Scored,
    }
}

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve_place(&self, candidate: &str) -> Result<Poi, Error> {
        let response = self.provider.search_places(candidate).await?;

        if response.status != "1" {
            tracing::warn!(info = %response.info, "place search failed");
            return Err(upstream_error());
        }

        let pois: Vec<Poi> = response.pois.iter().map(to_poi).collect();

        if pois.is_empty() {
            return Err(not_found_error(candidate));
        }

        match select_best(&pois, CATEGORY_PRIORITIES) {
            Some(index) => {
                let mut poi = pois[index].clone();
                if !poi.address.contains(&poi.name) {
                    poi.address = format!("{}{}", poi.address, poi.name);
                }
                Ok(poi)
            }
            None => {
                let mut poi = pois[0].clone();
                poi.address = poi.name.clone();
                poi.rating = None;
                poi.cost = None;
                poi.confidence = PoiConfidence::FirstResult;
                Ok(poi)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn resolve_or_synthesize(&self, candidate: &str) -> Result<Poi, Error> {
        match self.resolve_place(candidate).await {
            Ok(poi) => Ok(poi),
            Err(err) if looks_like_address(candidate) => {
                tracing::info!(%err, "place search missed; using the literal address");
                Ok(Poi::synthesized(candidate))
            }
            Err(err) => Err(err),
        }
    }
}
