//! # Marketing Repository
//!
//! Campaigns and the leads they bring in. A campaign's `leads` and
//! `conversions` counters are entered by marketing and are not derived from
//! the lead collection.

use chrono::{NaiveDate, Utc};
use estate_core::validation::{validate_campaign, validate_lead};
use estate_core::{Campaign, CampaignStatus, CampaignType, Lead, LeadStatus};
use serde::Deserialize;
use tracing::{debug, warn};

use super::merge_patch;
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

// =============================================================================
// Campaign
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub status: CampaignStatus,
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub leads: u32,
    #[serde(default)]
    pub conversions: u32,
    #[serde(default)]
    pub roi: f64,
    #[serde(default)]
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub campaign_type: Option<CampaignType>,
    pub status: Option<CampaignStatus>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub target_audience: Option<String>,
    pub leads: Option<u32>,
    pub conversions: Option<u32>,
    pub roi: Option<f64>,
    pub channels: Option<Vec<String>>,
}

impl EntityStore {
    pub fn add_campaign(&mut self, new: NewCampaign) -> StoreResult<Campaign> {
        let campaign = Campaign {
            id: Self::next_id(),
            name: new.name,
            campaign_type: new.campaign_type,
            status: new.status,
            budget: new.budget,
            spent: new.spent,
            start_date: new.start_date,
            end_date: new.end_date,
            target_audience: new.target_audience,
            leads: new.leads,
            conversions: new.conversions,
            roi: new.roi,
            channels: new.channels,
        };

        check_campaign(&campaign)?;

        debug!(id = %campaign.id, name = %campaign.name, budget = campaign.budget, "Adding campaign");
        self.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    pub fn update_campaign(&mut self, id: &str, patch: CampaignPatch) -> StoreResult<Campaign> {
        let current = self.campaigns.require(id)?;
        let mut campaign = current.clone();

        merge_patch!(campaign <- patch {
            name, campaign_type, status, budget, spent, start_date, end_date,
            target_audience, leads, conversions, roi, channels,
        });

        if campaign == *current {
            return Ok(campaign);
        }

        check_campaign(&campaign)?;

        debug!(
            id = %campaign.id,
            utilization = campaign.budget_rollup().utilization_percent,
            "Updating campaign"
        );
        self.campaigns.replace(campaign.clone())?;
        Ok(campaign)
    }
}

fn check_campaign(campaign: &Campaign) -> StoreResult<()> {
    validate_campaign(campaign).map_err(|err| {
        warn!(id = %campaign.id, error = %err, "Campaign rejected");
        StoreError::from(err)
    })
}

// =============================================================================
// Lead
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub source: String,
    pub status: LeadStatus,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub interested_in: Option<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub campaign_id: Option<Option<String>>,
    pub assigned_to: Option<String>,
    pub interested_in: Option<Option<String>>,
    pub notes: Option<String>,
}

impl EntityStore {
    pub fn add_lead(&mut self, new: NewLead) -> StoreResult<Lead> {
        let lead = Lead {
            id: Self::next_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            source: new.source,
            status: new.status,
            campaign_id: new.campaign_id,
            assigned_to: new.assigned_to,
            interested_in: new.interested_in,
            notes: new.notes,
            created_at: Utc::now(),
        };

        self.check_lead(&lead)?;

        debug!(id = %lead.id, source = %lead.source, "Adding lead");
        self.leads.push(lead.clone());
        Ok(lead)
    }

    pub fn update_lead(&mut self, id: &str, patch: LeadPatch) -> StoreResult<Lead> {
        let current = self.leads.require(id)?;
        let mut lead = current.clone();

        merge_patch!(lead <- patch {
            name, email, phone, source, status, campaign_id, assigned_to,
            interested_in, notes,
        });

        if lead == *current {
            return Ok(lead);
        }

        self.check_lead(&lead)?;

        debug!(id = %lead.id, status = %lead.status, "Updating lead");
        self.leads.replace(lead.clone())?;
        Ok(lead)
    }

    fn check_lead(&self, lead: &Lead) -> StoreResult<()> {
        let result = validate_lead(lead)
            .map_err(StoreError::from)
            .and_then(|()| match lead.campaign_id.as_deref() {
                Some(campaign_id) => self.require_campaign(campaign_id).map(|_| ()),
                None => Ok(()),
            })
            .and_then(|()| match lead.interested_in.as_deref() {
                Some(property_id) => self.require_property(property_id).map(|_| ()),
                None => Ok(()),
            });

        if let Err(err) = &result {
            warn!(id = %lead.id, error = %err, "Lead rejected");
        }
        result
    }
}
